//! # Analysis Record Handlers
//!
//! Creation of an analysis record with its task batch, and the defensive
//! reads over `actionItemIds`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::care::{owned_plant, resolve_action_items, AnalysisSubmission, CreatedAnalysis};
use crate::error::CareError;
use crate::models::{AnalysisRecord, CareTask, TaskDraft};
use crate::web::auth::AuthenticatedUser;
use crate::web::response_types::ApiResult;
use crate::web::state::AppState;

/// Request body for analysis submission. The opaque stage and instruction
/// payloads are passed through verbatim; reference fields are optional so
/// validation can name the missing ones.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnalysisRequest {
    pub plant_id: Option<String>,
    pub plant_type_id: Option<String>,
    pub current_stage: Option<serde_json::Value>,
    pub care_instructions: Option<serde_json::Value>,
    pub next_checkup_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tasks: Vec<TaskDraft>,
}

/// Analysis detail: the record plus the referenced tasks that still exist,
/// in list order. Dangling identifiers are dropped, not errors — the task
/// batch is written after the record and tasks can be deleted later.
#[derive(Debug, Serialize)]
pub struct AnalysisDetailResponse {
    #[serde(flatten)]
    pub analysis: AnalysisRecord,
    pub tasks: Vec<CareTask>,
}

/// Analysis history response for a plant.
#[derive(Debug, Serialize)]
pub struct AnalysisListResponse {
    pub analyses: Vec<AnalysisRecord>,
    pub count: usize,
}

/// Create an analysis record with its tasks: POST /v1/analyses
pub async fn create_analysis(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateAnalysisRequest>,
) -> ApiResult<(StatusCode, Json<CreatedAnalysis>)> {
    let created = state
        .analysis_creator
        .create_with_tasks(
            &user.user_id,
            AnalysisSubmission {
                plant_id: request.plant_id,
                plant_type_id: request.plant_type_id,
                current_stage: request.current_stage,
                care_instructions: request.care_instructions,
                next_checkup_date: request.next_checkup_date,
                tasks: request.tasks,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get one analysis with resolved tasks: GET /v1/analyses/{analysisId}
pub async fn get_analysis(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(analysis_id): Path<String>,
) -> ApiResult<Json<AnalysisDetailResponse>> {
    let analysis = state
        .store
        .get_analysis(&analysis_id, &user.user_id)
        .await
        .map_err(CareError::from)?
        .ok_or(CareError::NotFound)?;
    let tasks = resolve_action_items(state.store.as_ref(), &user.user_id, &analysis).await?;
    Ok(Json(AnalysisDetailResponse { analysis, tasks }))
}

/// List a plant's analyses, newest first: GET /v1/plants/{plantId}/analyses
pub async fn list_plant_analyses(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(plant_id): Path<String>,
) -> ApiResult<Json<AnalysisListResponse>> {
    let plant = owned_plant(state.store.as_ref(), &user.user_id, &plant_id).await?;
    let analyses = state
        .store
        .list_analyses_for_plant(&plant.plant_id, &user.user_id)
        .await
        .map_err(CareError::from)?;
    let count = analyses.len();
    Ok(Json(AnalysisListResponse { analyses, count }))
}
