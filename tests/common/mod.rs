//! Shared helpers for router-level integration tests: an in-process app
//! over the memory store with two known users, and a JSON request driver.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use plantcare_core::storage::MemoryStore;
use plantcare_core::web::auth::StaticTokenVerifier;
use plantcare_core::web::state::AppState;

pub const TOKEN_A: &str = "token-a";
pub const TOKEN_B: &str = "token-b";

/// Router over a fresh memory store with two configured users.
pub fn test_app() -> Router {
    let store = Arc::new(MemoryStore::new());
    let verifier = Arc::new(StaticTokenVerifier::new(HashMap::from([
        (TOKEN_A.to_string(), "user-a".to_string()),
        (TOKEN_B.to_string(), "user-b".to_string()),
    ])));
    plantcare_core::web::build_router(AppState::new(store, verifier))
}

/// Send one request; returns status and parsed JSON body (Null when empty).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Create a plant for the given token and return its identifier.
pub async fn create_plant(app: &Router, token: &str, nickname: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/v1/plants",
        Some(token),
        Some(serde_json::json!({
            "plantTypeId": "monstera-deliciosa",
            "nickname": nickname,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["plantId"].as_str().unwrap().to_string()
}
