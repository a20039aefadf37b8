//! Cross-user isolation: records created by one user must be invisible to
//! every other user, and the responses must not distinguish "absent" from
//! "owned by someone else".

mod common;

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use serde_json::json;

use common::{create_plant, send, test_app, TOKEN_A, TOKEN_B};

/// Set up a plant, an analysis, and one task for user A; returns
/// (plant_id, analysis_id, task_id).
async fn seed_user_a(app: &axum::Router) -> (String, String, String) {
    let plant_id = create_plant(app, TOKEN_A, "Monty").await;
    let due = (Utc::now() + Duration::days(1)).to_rfc3339();
    let (status, created) = send(
        app,
        Method::POST,
        "/v1/analyses",
        Some(TOKEN_A),
        Some(json!({
            "plantId": plant_id,
            "plantTypeId": "monstera-deliciosa",
            "currentStage": {"stageName": "vegetative"},
            "tasks": [{"description": "Water", "priority": "high", "category": "watering", "dueDate": due}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let analysis_id = created["analysisId"].as_str().unwrap().to_string();
    let task_id = created["taskIds"][0].as_str().unwrap().to_string();
    (plant_id, analysis_id, task_id)
}

#[tokio::test]
async fn foreign_records_are_reported_exactly_like_absent_ones() {
    let app = test_app();
    let (plant_id, analysis_id, task_id) = seed_user_a(&app).await;

    // Every read/update/delete from user B answers the same 404 envelope it
    // would for identifiers that never existed.
    let foreign_requests = [
        (Method::GET, format!("/v1/plants/{plant_id}"), None),
        (Method::GET, format!("/v1/tasks?plantId={plant_id}"), None),
        (
            Method::GET,
            format!("/v1/tasks?analysisId={analysis_id}"),
            None,
        ),
        (Method::GET, format!("/v1/analyses/{analysis_id}"), None),
        (Method::GET, format!("/v1/plants/{plant_id}/analyses"), None),
        (
            Method::PUT,
            format!("/v1/tasks/{task_id}"),
            Some(json!({"status": "completed"})),
        ),
        (Method::DELETE, format!("/v1/tasks/{task_id}"), None),
        (
            Method::POST,
            format!("/v1/plants/{plant_id}/tasks"),
            Some(json!({"tasks": []})),
        ),
    ];
    for (method, uri, body) in foreign_requests {
        let (status, response) = send(&app, method.clone(), &uri, Some(TOKEN_B), body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
        assert_eq!(response["error"]["code"], "NOT_FOUND");
        assert_eq!(response["error"]["message"], "Resource not found");
    }

    // Nothing of user A's leaks into user B's unscoped listing.
    let (status, listed) = send(&app, Method::GET, "/v1/tasks", Some(TOKEN_B), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["count"], 0);

    let (_, plants) = send(&app, Method::GET, "/v1/plants", Some(TOKEN_B), None).await;
    assert_eq!(plants["count"], 0);
}

#[tokio::test]
async fn failed_foreign_update_leaves_the_record_untouched() {
    let app = test_app();
    let (plant_id, _, task_id) = seed_user_a(&app).await;

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/v1/tasks/{task_id}"),
        Some(TOKEN_B),
        Some(json!({"status": "discarded", "comment": "not yours"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, listed) = send(
        &app,
        Method::GET,
        &format!("/v1/tasks?plantId={plant_id}"),
        Some(TOKEN_A),
        None,
    )
    .await;
    assert_eq!(listed["tasks"][0]["status"], "pending");
    assert!(listed["tasks"][0].get("comment").is_none());
}

#[tokio::test]
async fn users_operate_independently_on_equal_looking_data() {
    let app = test_app();
    let plant_a = create_plant(&app, TOKEN_A, "Twin").await;
    let plant_b = create_plant(&app, TOKEN_B, "Twin").await;
    let due = (Utc::now() + Duration::days(1)).to_rfc3339();

    for (token, plant_id) in [(TOKEN_A, &plant_a), (TOKEN_B, &plant_b)] {
        let (status, _) = send(
            &app,
            Method::POST,
            &format!("/v1/plants/{plant_id}/tasks"),
            Some(token),
            Some(json!({"tasks": [{"description": "Water", "dueDate": due}]})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    // Deleting B's task does not touch A's.
    let (_, listed_b) = send(&app, Method::GET, "/v1/tasks", Some(TOKEN_B), None).await;
    let task_b = listed_b["tasks"][0]["taskId"].as_str().unwrap().to_string();
    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/v1/tasks/{task_b}"),
        Some(TOKEN_B),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, listed_a) = send(&app, Method::GET, "/v1/tasks", Some(TOKEN_A), None).await;
    assert_eq!(listed_a["count"], 1);
}
