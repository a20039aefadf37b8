//! # Web API Application State
//!
//! Shared state for the web API: the storage backend, the identity
//! verifier, and the analysis creator component built over the store.

use std::sync::Arc;

use crate::care::AnalysisCreator;
use crate::storage::CareStore;
use crate::web::auth::IdentityVerifier;

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Storage backend for all three record kinds.
    pub store: Arc<dyn CareStore>,

    /// Bearer-token resolution (external collaborator behind a trait).
    pub verifier: Arc<dyn IdentityVerifier>,

    /// Analysis record + task batch creation component.
    pub analysis_creator: AnalysisCreator,
}

impl AppState {
    pub fn new(store: Arc<dyn CareStore>, verifier: Arc<dyn IdentityVerifier>) -> Self {
        let analysis_creator = AnalysisCreator::new(store.clone());
        Self {
            store,
            verifier,
            analysis_creator,
        }
    }
}
