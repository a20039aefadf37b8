//! # Health Check Handler
//!
//! Liveness endpoint for monitoring and load balancing; always available
//! and unauthenticated.

use axum::Json;
use serde::Serialize;

/// Basic health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
}

/// Basic health check endpoint: GET /health
pub async fn basic_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
