//! # Storage Layer
//!
//! Per-record persistence behind the [`CareStore`] trait. The backing store
//! supplies per-record atomicity and nothing more: no multi-record
//! transactions and no declarative cross-record constraints. Every
//! multi-entity invariant is maintained by the `care` module on top of these
//! primitives.
//!
//! Two backends ship: a DashMap-backed [`MemoryStore`] (tests, dev) and a
//! Postgres [`PostgresStore`] whose schema carries no foreign keys between
//! the three tables.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    AnalysisRecord, CareTask, NewAnalysisRecord, NewCareTask, NewTrackedPlant, TaskStatus,
    TrackedPlant,
};

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Backend failure; carries detail for server-side logging only.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Backend(err.to_string())
    }
}

impl From<StoreError> for crate::error::CareError {
    fn from(err: StoreError) -> Self {
        Self::Storage {
            message: err.to_string(),
        }
    }
}

/// Optional narrowing of a task listing. All present fields intersect, and
/// every listing is additionally scoped to the calling user.
#[derive(Debug, Clone, Default)]
pub struct TaskScope {
    pub plant_id: Option<String>,
    pub analysis_id: Option<String>,
    pub status: Option<TaskStatus>,
}

impl TaskScope {
    /// Scope to a single plant.
    pub fn for_plant(plant_id: impl Into<String>) -> Self {
        Self {
            plant_id: Some(plant_id.into()),
            ..Self::default()
        }
    }

    /// Scope to a single analysis record.
    pub fn for_analysis(analysis_id: impl Into<String>) -> Self {
        Self {
            analysis_id: Some(analysis_id.into()),
            ..Self::default()
        }
    }
}

/// Per-record storage operations for the three record kinds.
///
/// Listings return records in insertion order; that order is the baseline
/// the stable display sort preserves for ties.
#[async_trait]
pub trait CareStore: Send + Sync {
    // Tracked plants (read-mostly here; creation is a plain write).
    async fn insert_plant(
        &self,
        user_id: &str,
        new_plant: NewTrackedPlant,
    ) -> Result<TrackedPlant, StoreError>;
    async fn get_plant(&self, plant_id: &str) -> Result<Option<TrackedPlant>, StoreError>;
    async fn list_plants(&self, user_id: &str) -> Result<Vec<TrackedPlant>, StoreError>;

    // Analysis records: created once, never updated or deleted.
    async fn insert_analysis(
        &self,
        record: NewAnalysisRecord,
    ) -> Result<AnalysisRecord, StoreError>;
    async fn get_analysis(
        &self,
        analysis_id: &str,
        user_id: &str,
    ) -> Result<Option<AnalysisRecord>, StoreError>;
    async fn list_analyses_for_plant(
        &self,
        plant_id: &str,
        user_id: &str,
    ) -> Result<Vec<AnalysisRecord>, StoreError>;

    // Care tasks.
    async fn insert_tasks(&self, tasks: Vec<NewCareTask>) -> Result<usize, StoreError>;
    async fn find_task(
        &self,
        task_id: &str,
        user_id: &str,
    ) -> Result<Option<CareTask>, StoreError>;
    /// Replace the stored record for `task.task_id` (last write wins).
    async fn update_task(&self, task: &CareTask) -> Result<(), StoreError>;
    /// Hard delete scoped to the owning user; returns whether a record went
    /// away. Parent analysis records are left untouched.
    async fn delete_task(&self, task_id: &str, user_id: &str) -> Result<bool, StoreError>;
    async fn list_tasks(
        &self,
        user_id: &str,
        scope: &TaskScope,
    ) -> Result<Vec<CareTask>, StoreError>;
}
