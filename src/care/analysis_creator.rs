//! Analysis record creation with its spawned task batch.
//!
//! The record and its tasks live in separate collections and are written by
//! separate, non-transactional operations. Task identifiers are generated
//! up front so the record's `action_item_ids` can be stamped before any task
//! exists; the record is written first, so a concurrent reader may observe
//! it with zero, some, or all of its referenced tasks. Readers resolve the
//! list defensively ([`resolve_action_items`]) instead of treating a partial
//! task set as an error.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::ownership::owned_plant;
use crate::error::{CareError, Result};
use crate::models::{
    generate_task_id, AnalysisRecord, CareTask, NewAnalysisRecord, NewCareTask, TaskDraft,
};
use crate::storage::CareStore;

/// Days until the default next checkup when the submission does not name one.
const DEFAULT_CHECKUP_INTERVAL_DAYS: i64 = 7;

/// A submitted assessment: references, opaque analysis payloads, and the
/// recommended task drafts. Reference and stage fields are optional here so
/// validation can name exactly which required ones are missing.
#[derive(Debug, Clone, Default)]
pub struct AnalysisSubmission {
    pub plant_id: Option<String>,
    pub plant_type_id: Option<String>,
    pub current_stage: Option<serde_json::Value>,
    pub care_instructions: Option<serde_json::Value>,
    pub next_checkup_date: Option<DateTime<Utc>>,
    pub tasks: Vec<TaskDraft>,
}

/// Identifiers produced by a successful creation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedAnalysis {
    pub analysis_id: String,
    pub task_ids: Vec<String>,
}

/// Creates analysis records together with their task batches.
#[derive(Clone)]
pub struct AnalysisCreator {
    store: Arc<dyn CareStore>,
}

impl AnalysisCreator {
    pub fn new(store: Arc<dyn CareStore>) -> Self {
        Self { store }
    }

    /// Validate, link, and persist one analysis record plus its tasks.
    ///
    /// Write order is load-bearing: the record (carrying the full
    /// pre-generated identifier list) goes first, the task batch second.
    pub async fn create_with_tasks(
        &self,
        user_id: &str,
        submission: AnalysisSubmission,
    ) -> Result<CreatedAnalysis> {
        let mut missing = Vec::new();
        if submission.plant_id.as_deref().is_none_or(str::is_empty) {
            missing.push("plantId");
        }
        if submission.plant_type_id.as_deref().is_none_or(str::is_empty) {
            missing.push("plantTypeId");
        }
        if submission.current_stage.is_none() {
            missing.push("currentStage");
        }
        if !missing.is_empty() {
            return Err(CareError::invalid_request(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }
        let plant_id = submission.plant_id.unwrap_or_default();
        let plant_type_id = submission.plant_type_id.unwrap_or_default();
        let current_stage = submission.current_stage.unwrap_or_default();

        let plant = owned_plant(self.store.as_ref(), user_id, &plant_id).await?;

        let now = Utc::now();
        let task_ids: Vec<String> = submission
            .tasks
            .iter()
            .map(|_| generate_task_id(now))
            .collect();

        let record = self
            .store
            .insert_analysis(NewAnalysisRecord {
                user_id: user_id.to_string(),
                plant_id: plant.plant_id.clone(),
                plant_type_id: plant_type_id.clone(),
                analysis_date: now,
                current_stage,
                care_instructions: submission
                    .care_instructions
                    .unwrap_or_else(|| serde_json::json!({})),
                next_checkup_date: submission
                    .next_checkup_date
                    .unwrap_or_else(|| now + Duration::days(DEFAULT_CHECKUP_INTERVAL_DAYS)),
                action_item_ids: task_ids.clone(),
            })
            .await?;

        let new_tasks: Vec<NewCareTask> = submission
            .tasks
            .into_iter()
            .zip(task_ids.iter())
            .map(|(draft, task_id)| {
                NewCareTask::from_draft(
                    draft,
                    task_id.clone(),
                    user_id,
                    &plant.plant_id,
                    &plant_type_id,
                    Some(record.analysis_id.clone()),
                    now,
                )
            })
            .collect();
        let created = self.store.insert_tasks(new_tasks).await?;

        info!(
            user_id = %user_id,
            plant_id = %plant.plant_id,
            analysis_id = %record.analysis_id,
            task_count = created,
            "analysis record created with task batch"
        );

        Ok(CreatedAnalysis {
            analysis_id: record.analysis_id,
            task_ids,
        })
    }
}

/// Resolve an analysis record's `action_item_ids` to the tasks that still
/// exist, in list order.
///
/// Missing entries are expected — the task batch may not have landed yet, a
/// write may have failed partway, or a task may have been deleted since —
/// and are dropped silently apart from a debug-level note.
pub async fn resolve_action_items(
    store: &dyn CareStore,
    user_id: &str,
    record: &AnalysisRecord,
) -> Result<Vec<CareTask>> {
    let mut tasks = Vec::with_capacity(record.action_item_ids.len());
    for task_id in &record.action_item_ids {
        match store.find_task(task_id, user_id).await? {
            Some(task) => tasks.push(task),
            None => warn!(
                analysis_id = %record.analysis_id,
                task_id = %task_id,
                "analysis references a task that does not exist; dropping"
            ),
        }
    }
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewTrackedPlant, TaskPriority, TaskStatus};
    use crate::storage::{MemoryStore, TaskScope};

    async fn store_with_plant(user_id: &str) -> (Arc<MemoryStore>, String) {
        let store = Arc::new(MemoryStore::new());
        let plant = store
            .insert_plant(
                user_id,
                NewTrackedPlant {
                    plant_type_id: "monstera-deliciosa".to_string(),
                    nickname: "Monty".to_string(),
                    health_status: None,
                },
            )
            .await
            .unwrap();
        (store, plant.plant_id)
    }

    fn drafts(count: usize) -> Vec<TaskDraft> {
        (0..count)
            .map(|i| TaskDraft {
                description: format!("task {i}"),
                priority: TaskPriority::Medium,
                category: Default::default(),
                due_date: Utc::now() + Duration::days(i as i64 + 1),
            })
            .collect()
    }

    fn submission(plant_id: &str, tasks: Vec<TaskDraft>) -> AnalysisSubmission {
        AnalysisSubmission {
            plant_id: Some(plant_id.to_string()),
            plant_type_id: Some("monstera-deliciosa".to_string()),
            current_stage: Some(serde_json::json!({"stageName": "vegetative"})),
            care_instructions: Some(serde_json::json!({"watering": "weekly"})),
            next_checkup_date: Some(Utc::now() + Duration::days(14)),
            tasks,
        }
    }

    #[tokio::test]
    async fn batch_linking_is_exact() {
        let (store, plant_id) = store_with_plant("user-1").await;
        let creator = AnalysisCreator::new(store.clone());

        let created = creator
            .create_with_tasks("user-1", submission(&plant_id, drafts(3)))
            .await
            .unwrap();
        assert_eq!(created.task_ids.len(), 3);

        let record = store
            .get_analysis(&created.analysis_id, "user-1")
            .await
            .unwrap()
            .unwrap();
        // Same list, same order, same count.
        assert_eq!(record.action_item_ids, created.task_ids);
        assert_eq!(record.plant_id, plant_id);

        for task_id in &created.task_ids {
            let task = store.find_task(task_id, "user-1").await.unwrap().unwrap();
            assert_eq!(task.status, TaskStatus::Pending);
            assert_eq!(task.analysis_id.as_deref(), Some(created.analysis_id.as_str()));
            assert_eq!(task.plant_id, record.plant_id);
            assert_eq!(task.user_id, record.user_id);
        }
    }

    #[tokio::test]
    async fn empty_draft_list_creates_record_with_no_tasks() {
        let (store, plant_id) = store_with_plant("user-1").await;
        let creator = AnalysisCreator::new(store.clone());

        let created = creator
            .create_with_tasks("user-1", submission(&plant_id, Vec::new()))
            .await
            .unwrap();
        assert!(created.task_ids.is_empty());

        let tasks = store
            .list_tasks("user-1", &TaskScope::for_analysis(created.analysis_id.clone()))
            .await
            .unwrap();
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn missing_fields_are_named() {
        let (store, _) = store_with_plant("user-1").await;
        let creator = AnalysisCreator::new(store);

        let err = creator
            .create_with_tasks(
                "user-1",
                AnalysisSubmission {
                    plant_id: None,
                    plant_type_id: Some("monstera-deliciosa".to_string()),
                    current_stage: None,
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("plantId"));
        assert!(message.contains("currentStage"));
        assert!(!message.contains("plantTypeId"));
    }

    #[tokio::test]
    async fn foreign_plant_is_not_found() {
        let (store, plant_id) = store_with_plant("user-a").await;
        let creator = AnalysisCreator::new(store);

        let err = creator
            .create_with_tasks("user-b", submission(&plant_id, drafts(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, CareError::NotFound));
    }

    #[tokio::test]
    async fn resolution_drops_missing_tasks() {
        let (store, plant_id) = store_with_plant("user-1").await;
        let creator = AnalysisCreator::new(store.clone());

        let created = creator
            .create_with_tasks("user-1", submission(&plant_id, drafts(3)))
            .await
            .unwrap();
        // Delete the middle task; its identifier stays in the record.
        assert!(store
            .delete_task(&created.task_ids[1], "user-1")
            .await
            .unwrap());

        let record = store
            .get_analysis(&created.analysis_id, "user-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.action_item_ids.len(), 3);

        let resolved = resolve_action_items(store.as_ref(), "user-1", &record)
            .await
            .unwrap();
        let resolved_ids: Vec<&str> = resolved.iter().map(|t| t.task_id.as_str()).collect();
        assert_eq!(
            resolved_ids,
            vec![created.task_ids[0].as_str(), created.task_ids[2].as_str()]
        );
    }
}
