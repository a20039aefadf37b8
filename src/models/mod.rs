//! # Record Shapes
//!
//! The three record kinds the lifecycle engine keeps mutually consistent:
//! tracked plants, analysis records, and care tasks. All identifiers are
//! opaque strings; wire format is camelCase JSON.

pub mod analysis;
pub mod care_task;
pub mod plant;

pub use analysis::{AnalysisRecord, NewAnalysisRecord};
pub use care_task::{
    generate_task_id, CareTask, NewCareTask, TaskCategory, TaskDraft, TaskPriority, TaskStatus,
};
pub use plant::{NewTrackedPlant, TrackedPlant};
