//! Care task records and their status/priority/category value sets.
//!
//! Task identifiers are generated locally (time component plus random
//! suffix) rather than by the storage layer: a task's identity must be known
//! before the task row and the parent analysis record's reference list are
//! written in separate operations.
//!
//! The status, priority, and category sets are closed in the documented API
//! but permissive at the storage boundary: out-of-set values round-trip
//! verbatim through the `Other` variants instead of being rejected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Task lifecycle status: `pending` until resolved as `completed` or
/// `discarded`. Transitions back out of a terminal status are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Completed,
    Discarded,
    /// Out-of-set value accepted verbatim.
    Other(String),
}

impl TaskStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Discarded => "discarded",
            Self::Other(value) => value,
        }
    }

    /// Whether this status carries a completion timestamp.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Discarded)
    }

    /// Display-order class: pending sorts before completed, completed before
    /// discarded, out-of-set values after everything known.
    pub fn sort_class(&self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Completed => 1,
            Self::Discarded => 2,
            Self::Other(_) => 3,
        }
    }
}

impl From<&str> for TaskStatus {
    fn from(value: &str) -> Self {
        match value {
            "pending" => Self::Pending,
            "completed" => Self::Completed,
            "discarded" => Self::Discarded,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for TaskStatus {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TaskStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from(String::deserialize(deserializer)?))
    }
}

/// Task priority: `high`, `medium`, or `low`; more urgent sorts first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskPriority {
    High,
    Medium,
    Low,
    /// Out-of-set value accepted verbatim.
    Other(String),
}

impl TaskPriority {
    pub fn as_str(&self) -> &str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Other(value) => value,
        }
    }

    /// Urgency rank, ascending = more urgent. Out-of-set values rank last.
    pub fn urgency_rank(&self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
            Self::Other(_) => 3,
        }
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        Self::Medium
    }
}

impl From<&str> for TaskPriority {
    fn from(value: &str) -> Self {
        match value {
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for TaskPriority {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TaskPriority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TaskPriority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from(String::deserialize(deserializer)?))
    }
}

/// Task category within the care domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskCategory {
    Watering,
    Fertilizing,
    Pruning,
    Monitoring,
    PestControl,
    General,
    /// Out-of-set value accepted verbatim.
    Other(String),
}

impl TaskCategory {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Watering => "watering",
            Self::Fertilizing => "fertilizing",
            Self::Pruning => "pruning",
            Self::Monitoring => "monitoring",
            Self::PestControl => "pest_control",
            Self::General => "general",
            Self::Other(value) => value,
        }
    }
}

impl Default for TaskCategory {
    fn default() -> Self {
        Self::General
    }
}

impl From<&str> for TaskCategory {
    fn from(value: &str) -> Self {
        match value {
            "watering" => Self::Watering,
            "fertilizing" => Self::Fertilizing,
            "pruning" => Self::Pruning,
            "monitoring" => Self::Monitoring,
            "pest_control" => Self::PestControl,
            "general" => Self::General,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for TaskCategory {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TaskCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TaskCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from(String::deserialize(deserializer)?))
    }
}

/// One actionable care recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareTask {
    /// Locally generated opaque identifier; the task's public identity.
    pub task_id: String,
    /// Storage-assigned record key, independent of `task_id`.
    pub record_id: String,
    pub user_id: String,
    pub plant_id: String,
    /// Denormalized catalog plant-type reference.
    pub plant_type_id: String,
    /// Spawning analysis record, when batch-created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_id: Option<String>,
    pub description: String,
    pub priority: TaskPriority,
    pub category: TaskCategory,
    pub due_date: DateTime<Utc>,
    pub created_date: DateTime<Utc>,
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<DateTime<Utc>>,
}

impl CareTask {
    /// Whether the task's due date lies strictly before `instant`.
    pub fn is_overdue_at(&self, instant: DateTime<Utc>) -> bool {
        self.due_date < instant
    }
}

/// A recommended task as submitted by callers (analysis payload or direct
/// creation); the engine supplies identity, status, and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub description: String,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub category: TaskCategory,
    pub due_date: DateTime<Utc>,
}

/// Fully stamped task awaiting its storage-assigned record key.
#[derive(Debug, Clone)]
pub struct NewCareTask {
    pub task_id: String,
    pub user_id: String,
    pub plant_id: String,
    pub plant_type_id: String,
    pub analysis_id: Option<String>,
    pub description: String,
    pub priority: TaskPriority,
    pub category: TaskCategory,
    pub due_date: DateTime<Utc>,
    pub created_date: DateTime<Utc>,
    pub status: TaskStatus,
}

impl NewCareTask {
    /// Stamp a draft into a persistable task: pre-generated identifier,
    /// `pending` status, creation time `now`.
    pub fn from_draft(
        draft: TaskDraft,
        task_id: String,
        user_id: &str,
        plant_id: &str,
        plant_type_id: &str,
        analysis_id: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            task_id,
            user_id: user_id.to_string(),
            plant_id: plant_id.to_string(),
            plant_type_id: plant_type_id.to_string(),
            analysis_id,
            description: draft.description,
            priority: draft.priority,
            category: draft.category,
            due_date: draft.due_date,
            created_date: now,
            status: TaskStatus::Pending,
        }
    }

    /// Attach the storage-assigned record key.
    pub fn into_task(self, record_id: String) -> CareTask {
        CareTask {
            task_id: self.task_id,
            record_id,
            user_id: self.user_id,
            plant_id: self.plant_id,
            plant_type_id: self.plant_type_id,
            analysis_id: self.analysis_id,
            description: self.description,
            priority: self.priority,
            category: self.category,
            due_date: self.due_date,
            created_date: self.created_date,
            status: self.status,
            completed_date: None,
            comment: None,
            updated_date: None,
        }
    }
}

/// Generate a fresh opaque task identifier.
///
/// Format: millisecond timestamp plus a random suffix. The format itself is
/// not load-bearing; uniqueness and collision resistance are.
pub fn generate_task_id(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("task_{}_{}", now.timestamp_millis(), &suffix[..12])
}
