//! PlantCare server binary.
//!
//! Wires configuration, logging, the storage backend, and the identity
//! verifier into the web router and serves it.

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use plantcare_core::config::CoreConfig;
use plantcare_core::logging;
use plantcare_core::storage::{CareStore, MemoryStore, PostgresStore};
use plantcare_core::web::auth::StaticTokenVerifier;
use plantcare_core::web::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();
    let config = CoreConfig::load().context("loading configuration")?;

    let store: Arc<dyn CareStore> = match &config.database_url {
        Some(database_url) => {
            let store = PostgresStore::connect(database_url)
                .await
                .context("connecting to postgres")?;
            store.migrate().await.context("applying migrations")?;
            info!("using postgres store");
            Arc::new(store)
        }
        None => {
            warn!("no database_url configured; records will not survive restarts");
            Arc::new(MemoryStore::new())
        }
    };

    if config.auth_tokens.is_empty() {
        warn!("no auth_tokens configured; every request will be rejected with 401");
    }
    let verifier = Arc::new(StaticTokenVerifier::new(config.auth_tokens.clone()));

    let router = plantcare_core::web::build_router(AppState::new(store, verifier));
    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("binding {}", config.bind_address))?;
    info!(address = %config.bind_address, "plantcare server listening");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
