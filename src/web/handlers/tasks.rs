//! # Care Task Handlers
//!
//! Listing, direct creation, status updates, and deletion of individual
//! tasks. Listings come back in the canonical display order.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::care::{self, ListScope};
use crate::models::{CareTask, TaskDraft, TaskStatus};
use crate::web::auth::AuthenticatedUser;
use crate::web::response_types::{ApiError, ApiResult};
use crate::web::state::AppState;

/// Query parameters for task listing. Callers usually scope by one of the
/// three; none at all lists the caller's entire task set.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListQuery {
    pub plant_id: Option<String>,
    pub analysis_id: Option<String>,
    pub status: Option<TaskStatus>,
}

/// Task list response, ordered for display.
#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub tasks: Vec<CareTask>,
    pub count: usize,
}

/// Request body for direct task creation.
#[derive(Debug, Deserialize)]
pub struct CreateTasksRequest {
    #[serde(default)]
    pub tasks: Vec<TaskDraft>,
}

/// Response for direct task creation.
#[derive(Debug, Serialize)]
pub struct TasksCreatedResponse {
    pub created: usize,
}

/// Request body for a status update.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub status: Option<TaskStatus>,
    pub comment: Option<String>,
}

/// Response for task deletion.
#[derive(Debug, Serialize)]
pub struct TaskDeletedResponse {
    pub deleted: bool,
}

/// List tasks: GET /v1/tasks?plantId=&analysisId=&status=
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<TaskListQuery>,
) -> ApiResult<Json<TaskListResponse>> {
    let tasks = care::list_tasks(
        state.store.as_ref(),
        &user.user_id,
        ListScope {
            plant_id: query.plant_id,
            analysis_id: query.analysis_id,
            status: query.status,
        },
        Utc::now(),
    )
    .await?;
    let count = tasks.len();
    Ok(Json(TaskListResponse { tasks, count }))
}

/// Create tasks for a plant: POST /v1/plants/{plantId}/tasks
pub async fn create_plant_tasks(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(plant_id): Path<String>,
    Json(request): Json<CreateTasksRequest>,
) -> ApiResult<(StatusCode, Json<TasksCreatedResponse>)> {
    let created = care::create_tasks(
        state.store.as_ref(),
        &user.user_id,
        &plant_id,
        request.tasks,
        Utc::now(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(TasksCreatedResponse { created })))
}

/// Update a task's status: PUT /v1/tasks/{taskId}
pub async fn update_task(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(task_id): Path<String>,
    Json(request): Json<UpdateTaskRequest>,
) -> ApiResult<Json<CareTask>> {
    let Some(status) = request.status else {
        return Err(ApiError::bad_request("missing required fields: status"));
    };
    let task = care::update_task_status(
        state.store.as_ref(),
        &user.user_id,
        &task_id,
        status,
        request.comment,
        Utc::now(),
    )
    .await?;
    Ok(Json(task))
}

/// Delete a task: DELETE /v1/tasks/{taskId}
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(task_id): Path<String>,
) -> ApiResult<Json<TaskDeletedResponse>> {
    care::delete_task(state.store.as_ref(), &user.user_id, &task_id).await?;
    Ok(Json(TaskDeletedResponse { deleted: true }))
}

/// PUT/DELETE /v1/tasks without an identifier segment.
///
/// The documented contract answers 400 here, not a routing 404/405.
pub async fn missing_task_identifier() -> ApiError {
    ApiError::bad_request("missing task identifier")
}
