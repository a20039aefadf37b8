//! # Care Task Lifecycle Engine
//!
//! The rules that keep tracked plants, analysis records, and care tasks
//! mutually consistent across independent per-record writes:
//!
//! - [`ownership`] — the shared plant ownership check every plant-scoped
//!   operation runs first
//! - [`analysis_creator`] — analysis record plus task batch creation with
//!   bidirectional linking through pre-generated task identifiers
//! - [`task_lifecycle`] — list / create / status update / delete for
//!   individual tasks
//! - [`sorting`] — the canonical multi-key display ordering of a task set

pub mod analysis_creator;
pub mod ownership;
pub mod sorting;
pub mod task_lifecycle;

pub use analysis_creator::{
    resolve_action_items, AnalysisCreator, AnalysisSubmission, CreatedAnalysis,
};
pub use ownership::owned_plant;
pub use sorting::sort_tasks_for_display;
pub use task_lifecycle::{create_tasks, delete_task, list_tasks, update_task_status, ListScope};
