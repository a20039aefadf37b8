//! In-memory store backed by DashMap.
//!
//! Mirrors the production backend's contract exactly: per-record atomicity,
//! last-write-wins updates, no cross-record constraints. An insertion
//! sequence provides the deterministic storage order listings return.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use super::{CareStore, StoreError, TaskScope};
use crate::models::{
    AnalysisRecord, CareTask, NewAnalysisRecord, NewCareTask, NewTrackedPlant, TrackedPlant,
};

#[derive(Debug, Clone)]
struct Sequenced<T> {
    seq: u64,
    record: T,
}

/// DashMap-backed [`CareStore`] used by tests and token-map dev deployments.
#[derive(Debug, Default)]
pub struct MemoryStore {
    plants: DashMap<String, Sequenced<TrackedPlant>>,
    analyses: DashMap<String, Sequenced<AnalysisRecord>>,
    /// Keyed by the locally generated task identifier, not the record key.
    tasks: DashMap<String, Sequenced<CareTask>>,
    sequence: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_seq(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::Relaxed)
    }
}

#[async_trait]
impl CareStore for MemoryStore {
    async fn insert_plant(
        &self,
        user_id: &str,
        new_plant: NewTrackedPlant,
    ) -> Result<TrackedPlant, StoreError> {
        let plant = TrackedPlant {
            plant_id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            plant_type_id: new_plant.plant_type_id.clone(),
            nickname: new_plant.nickname.clone(),
            health_status: new_plant.health_status_or_default(),
            created_date: chrono::Utc::now(),
        };
        self.plants.insert(
            plant.plant_id.clone(),
            Sequenced {
                seq: self.next_seq(),
                record: plant.clone(),
            },
        );
        Ok(plant)
    }

    async fn get_plant(&self, plant_id: &str) -> Result<Option<TrackedPlant>, StoreError> {
        Ok(self.plants.get(plant_id).map(|entry| entry.record.clone()))
    }

    async fn list_plants(&self, user_id: &str) -> Result<Vec<TrackedPlant>, StoreError> {
        let mut plants: Vec<Sequenced<TrackedPlant>> = self
            .plants
            .iter()
            .filter(|entry| entry.record.user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        plants.sort_by_key(|entry| entry.seq);
        Ok(plants.into_iter().map(|entry| entry.record).collect())
    }

    async fn insert_analysis(
        &self,
        record: NewAnalysisRecord,
    ) -> Result<AnalysisRecord, StoreError> {
        let record = record.into_record(Uuid::new_v4().to_string());
        self.analyses.insert(
            record.analysis_id.clone(),
            Sequenced {
                seq: self.next_seq(),
                record: record.clone(),
            },
        );
        Ok(record)
    }

    async fn get_analysis(
        &self,
        analysis_id: &str,
        user_id: &str,
    ) -> Result<Option<AnalysisRecord>, StoreError> {
        Ok(self
            .analyses
            .get(analysis_id)
            .filter(|entry| entry.record.user_id == user_id)
            .map(|entry| entry.record.clone()))
    }

    async fn list_analyses_for_plant(
        &self,
        plant_id: &str,
        user_id: &str,
    ) -> Result<Vec<AnalysisRecord>, StoreError> {
        let mut records: Vec<Sequenced<AnalysisRecord>> = self
            .analyses
            .iter()
            .filter(|entry| entry.record.plant_id == plant_id && entry.record.user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        // Newest first; the sequence breaks same-instant ties.
        records.sort_by(|a, b| {
            b.record
                .analysis_date
                .cmp(&a.record.analysis_date)
                .then(b.seq.cmp(&a.seq))
        });
        Ok(records.into_iter().map(|entry| entry.record).collect())
    }

    async fn insert_tasks(&self, tasks: Vec<NewCareTask>) -> Result<usize, StoreError> {
        let count = tasks.len();
        for new_task in tasks {
            let task = new_task.into_task(Uuid::new_v4().to_string());
            self.tasks.insert(
                task.task_id.clone(),
                Sequenced {
                    seq: self.next_seq(),
                    record: task,
                },
            );
        }
        Ok(count)
    }

    async fn find_task(
        &self,
        task_id: &str,
        user_id: &str,
    ) -> Result<Option<CareTask>, StoreError> {
        Ok(self
            .tasks
            .get(task_id)
            .filter(|entry| entry.record.user_id == user_id)
            .map(|entry| entry.record.clone()))
    }

    async fn update_task(&self, task: &CareTask) -> Result<(), StoreError> {
        if let Some(mut entry) = self.tasks.get_mut(&task.task_id) {
            entry.record = task.clone();
        }
        Ok(())
    }

    async fn delete_task(&self, task_id: &str, user_id: &str) -> Result<bool, StoreError> {
        Ok(self
            .tasks
            .remove_if(task_id, |_, entry| entry.record.user_id == user_id)
            .is_some())
    }

    async fn list_tasks(
        &self,
        user_id: &str,
        scope: &TaskScope,
    ) -> Result<Vec<CareTask>, StoreError> {
        let mut tasks: Vec<Sequenced<CareTask>> = self
            .tasks
            .iter()
            .filter(|entry| {
                let task = &entry.record;
                task.user_id == user_id
                    && scope
                        .plant_id
                        .as_ref()
                        .is_none_or(|plant_id| &task.plant_id == plant_id)
                    && scope
                        .analysis_id
                        .as_ref()
                        .is_none_or(|analysis_id| task.analysis_id.as_ref() == Some(analysis_id))
                    && scope
                        .status
                        .as_ref()
                        .is_none_or(|status| &task.status == status)
            })
            .map(|entry| entry.value().clone())
            .collect();
        tasks.sort_by_key(|entry| entry.seq);
        Ok(tasks.into_iter().map(|entry| entry.record).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{generate_task_id, TaskDraft, TaskPriority, TaskStatus};
    use chrono::Utc;

    fn draft(description: &str) -> TaskDraft {
        TaskDraft {
            description: description.to_string(),
            priority: TaskPriority::Medium,
            category: Default::default(),
            due_date: Utc::now(),
        }
    }

    fn new_task(user_id: &str, plant_id: &str, description: &str) -> NewCareTask {
        let now = Utc::now();
        NewCareTask::from_draft(
            draft(description),
            generate_task_id(now),
            user_id,
            plant_id,
            "type-1",
            None,
            now,
        )
    }

    #[tokio::test]
    async fn listing_preserves_insertion_order() {
        let store = MemoryStore::new();
        for description in ["first", "second", "third"] {
            store
                .insert_tasks(vec![new_task("user-1", "plant-1", description)])
                .await
                .unwrap();
        }
        let tasks = store
            .list_tasks("user-1", &TaskScope::default())
            .await
            .unwrap();
        let descriptions: Vec<&str> = tasks.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(descriptions, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn listing_is_scoped_to_user() {
        let store = MemoryStore::new();
        store
            .insert_tasks(vec![new_task("user-a", "plant-1", "mine")])
            .await
            .unwrap();
        store
            .insert_tasks(vec![new_task("user-b", "plant-1", "theirs")])
            .await
            .unwrap();

        let tasks = store
            .list_tasks("user-a", &TaskScope::for_plant("plant-1"))
            .await
            .unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].description, "mine");
    }

    #[tokio::test]
    async fn find_task_hides_foreign_records() {
        let store = MemoryStore::new();
        let task = new_task("user-a", "plant-1", "mine");
        let task_id = task.task_id.clone();
        store.insert_tasks(vec![task]).await.unwrap();

        assert!(store.find_task(&task_id, "user-a").await.unwrap().is_some());
        assert!(store.find_task(&task_id, "user-b").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_is_scoped_to_user() {
        let store = MemoryStore::new();
        let task = new_task("user-a", "plant-1", "mine");
        let task_id = task.task_id.clone();
        store.insert_tasks(vec![task]).await.unwrap();

        assert!(!store.delete_task(&task_id, "user-b").await.unwrap());
        assert!(store.delete_task(&task_id, "user-a").await.unwrap());
        assert!(store.find_task(&task_id, "user-a").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn status_scope_filters() {
        let store = MemoryStore::new();
        let mut completed = new_task("user-1", "plant-1", "done");
        completed.status = TaskStatus::Completed;
        store
            .insert_tasks(vec![completed, new_task("user-1", "plant-1", "open")])
            .await
            .unwrap();

        let scope = TaskScope {
            status: Some(TaskStatus::Pending),
            ..Default::default()
        };
        let tasks = store.list_tasks("user-1", &scope).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].description, "open");
    }
}
