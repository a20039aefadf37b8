//! # Tracked Plant Handlers
//!
//! Single-record plant operations: the plants the lifecycle engine's
//! ownership checks read have to come from somewhere.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::care::owned_plant;
use crate::models::{NewTrackedPlant, TrackedPlant};
use crate::web::auth::AuthenticatedUser;
use crate::web::response_types::{ApiError, ApiResult};
use crate::web::state::AppState;

/// Request body for plant creation. Fields are optional so validation can
/// name the missing ones instead of failing JSON extraction.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlantRequest {
    pub plant_type_id: Option<String>,
    pub nickname: Option<String>,
    pub health_status: Option<String>,
}

/// Plant list response.
#[derive(Debug, Serialize)]
pub struct PlantListResponse {
    pub plants: Vec<TrackedPlant>,
    pub count: usize,
}

/// Create a tracked plant: POST /v1/plants
pub async fn create_plant(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreatePlantRequest>,
) -> ApiResult<(StatusCode, Json<TrackedPlant>)> {
    let mut missing = Vec::new();
    if request.plant_type_id.as_deref().is_none_or(str::is_empty) {
        missing.push("plantTypeId");
    }
    if request.nickname.as_deref().is_none_or(str::is_empty) {
        missing.push("nickname");
    }
    if !missing.is_empty() {
        return Err(ApiError::bad_request(format!(
            "missing required fields: {}",
            missing.join(", ")
        )));
    }

    let plant = state
        .store
        .insert_plant(
            &user.user_id,
            NewTrackedPlant {
                plant_type_id: request.plant_type_id.unwrap_or_default(),
                nickname: request.nickname.unwrap_or_default(),
                health_status: request.health_status,
            },
        )
        .await
        .map_err(crate::error::CareError::from)?;

    info!(user_id = %user.user_id, plant_id = %plant.plant_id, "plant created");
    Ok((StatusCode::CREATED, Json(plant)))
}

/// List the caller's plants: GET /v1/plants
pub async fn list_plants(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<PlantListResponse>> {
    let plants = state
        .store
        .list_plants(&user.user_id)
        .await
        .map_err(crate::error::CareError::from)?;
    let count = plants.len();
    Ok(Json(PlantListResponse { plants, count }))
}

/// Get one plant: GET /v1/plants/{plantId}
pub async fn get_plant(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(plant_id): Path<String>,
) -> ApiResult<Json<TrackedPlant>> {
    let plant = owned_plant(state.store.as_ref(), &user.user_id, &plant_id).await?;
    Ok(Json(plant))
}
