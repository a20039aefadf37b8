//! Identity verification seam.
//!
//! Token verification itself is an external collaborator: this engine only
//! depends on the [`IdentityVerifier`] trait, which resolves a bearer token
//! to an authenticated user identifier. Deployments plug in their identity
//! provider; the shipped [`StaticTokenVerifier`] serves development and
//! tests from a configured token map.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

/// The caller identity every handler operates under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: String,
}

/// Verification failure. Carries no detail by design; the web layer answers
/// a generic 401 either way.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid or expired token")]
    InvalidToken,
}

/// Resolves a bearer token to an authenticated user.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

/// Token-map verifier for development and tests.
#[derive(Debug, Default)]
pub struct StaticTokenVerifier {
    tokens: HashMap<String, String>,
}

impl StaticTokenVerifier {
    /// Build from `token -> user id` pairs.
    pub fn new(tokens: HashMap<String, String>) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl IdentityVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        self.tokens
            .get(token)
            .map(|user_id| AuthenticatedUser {
                user_id: user_id.clone(),
            })
            .ok_or(AuthError::InvalidToken)
    }
}
