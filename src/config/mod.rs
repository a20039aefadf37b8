//! # Configuration
//!
//! Layered configuration for the server binary: an optional `plantcare.toml`
//! next to the process, overridden by `PLANTCARE_*` environment variables.
//! The library itself takes its collaborators (store, verifier) as values;
//! this module only serves deployment wiring.

use std::collections::HashMap;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Deployment configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CoreConfig {
    /// Listen address for the HTTP server.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Postgres connection string; absent selects the in-memory store.
    #[serde(default)]
    pub database_url: Option<String>,

    /// `token -> user id` map for the static dev/test identity verifier.
    /// Production deployments replace the verifier, not this map.
    #[serde(default)]
    pub auth_tokens: HashMap<String, String>,
}

fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            database_url: None,
            auth_tokens: HashMap::new(),
        }
    }
}

impl CoreConfig {
    /// Load from `plantcare.toml` (optional) with `PLANTCARE_*` overrides.
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("plantcare").required(false))
            .add_source(Environment::with_prefix("PLANTCARE"))
            .build()?
            .try_deserialize()
    }
}
