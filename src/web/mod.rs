//! # Web API
//!
//! The HTTP surface over the lifecycle engine: an axum router with bearer
//! authentication on every `/v1` route, permissive CORS, and the error
//! envelope defined in [`response_types`].

pub mod auth;
pub mod handlers;
pub mod middleware;
pub mod response_types;
pub mod state;

use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::web::handlers::{analyses, health, plants, tasks};
use crate::web::state::AppState;

/// Build the full application router.
///
/// `/health` stays outside authentication; everything under `/v1` requires
/// a bearer token. The preflight middleware sits outermost so `OPTIONS`
/// answers 204 regardless of route or auth.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/v1/plants",
            post(plants::create_plant).get(plants::list_plants),
        )
        .route("/v1/plants/{plant_id}", get(plants::get_plant))
        .route(
            "/v1/plants/{plant_id}/tasks",
            post(tasks::create_plant_tasks),
        )
        .route(
            "/v1/plants/{plant_id}/analyses",
            get(analyses::list_plant_analyses),
        )
        .route("/v1/analyses", post(analyses::create_analysis))
        .route("/v1/analyses/{analysis_id}", get(analyses::get_analysis))
        .route(
            "/v1/tasks",
            get(tasks::list_tasks)
                .put(tasks::missing_task_identifier)
                .delete(tasks::missing_task_identifier),
        )
        .route(
            "/v1/tasks/{task_id}",
            put(tasks::update_task).delete(tasks::delete_task),
        )
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .route("/health", get(health::basic_health))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
        .layer(from_fn(middleware::cors::preflight_no_content))
        .with_state(state)
}
