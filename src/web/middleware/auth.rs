//! # Authentication Middleware
//!
//! Bearer-token authentication for the `/v1` endpoints. Extracts the token,
//! hands it to the configured [`IdentityVerifier`], and makes the resolved
//! [`AuthenticatedUser`] available to handlers via request extensions.
//!
//! Failures answer a generic 401: the response never reveals whether the
//! header was missing, malformed, or carried an invalid token.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, warn};

use crate::web::auth::AuthenticatedUser;
use crate::web::response_types::ApiError;
use crate::web::state::AppState;

/// Authentication middleware for protected endpoints.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or(ApiError::Unauthorized)?;

    let auth_str = auth_header.to_str().map_err(|_| ApiError::Unauthorized)?;
    let token = extract_bearer_token(auth_str)?;

    let user: AuthenticatedUser = state.verifier.verify(token).await.map_err(|err| {
        warn!(error = %err, "token verification failed");
        ApiError::Unauthorized
    })?;

    debug!(user_id = %user.user_id, "authenticated request");

    // Make the caller identity available to handlers.
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Extract the Bearer token from an Authorization header value.
fn extract_bearer_token(auth_header: &str) -> Result<&str, ApiError> {
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthorized)?;
    if token.is_empty() {
        return Err(ApiError::Unauthorized);
    }
    Ok(token)
}
