//! Cross-origin preflight contract.
//!
//! The documented contract is `OPTIONS` → 204 with permissive CORS headers,
//! unconditionally. `CorsLayer` answers preflights itself with 200, so this
//! outermost middleware rewrites the status of every `OPTIONS` response; the
//! permissive headers come from the `CorsLayer` underneath.

use axum::extract::Request;
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::Response;

/// Force every `OPTIONS` response to 204 No Content.
pub async fn preflight_no_content(request: Request, next: Next) -> Response {
    let is_options = request.method() == Method::OPTIONS;
    let mut response = next.run(request).await;
    if is_options {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}
