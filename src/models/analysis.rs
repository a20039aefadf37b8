//! Analysis records.
//!
//! One `AnalysisRecord` per completed assessment of a tracked plant. The
//! stage snapshot and care instructions are produced by an external analysis
//! step and passed through verbatim; this engine never inspects them.
//!
//! `action_item_ids` is a best-effort index into the task collection, not a
//! foreign key: tasks are written after the record (and may fail, or later
//! be deleted), so readers resolve the list defensively and drop entries
//! with no matching task.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted assessment snapshot of a tracked plant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    /// Storage-assigned opaque identifier.
    pub analysis_id: String,
    pub user_id: String,
    pub plant_id: String,
    /// Denormalized catalog plant-type reference, copied at creation.
    pub plant_type_id: String,
    pub analysis_date: DateTime<Utc>,
    /// Opaque growth-stage structure, passed through verbatim.
    pub current_stage: serde_json::Value,
    /// Opaque care-instructions structure, passed through verbatim.
    pub care_instructions: serde_json::Value,
    pub next_checkup_date: DateTime<Utc>,
    /// Ordered identifiers of the tasks this analysis spawned.
    pub action_item_ids: Vec<String>,
}

/// Analysis record awaiting its storage-assigned identifier.
#[derive(Debug, Clone)]
pub struct NewAnalysisRecord {
    pub user_id: String,
    pub plant_id: String,
    pub plant_type_id: String,
    pub analysis_date: DateTime<Utc>,
    pub current_stage: serde_json::Value,
    pub care_instructions: serde_json::Value,
    pub next_checkup_date: DateTime<Utc>,
    pub action_item_ids: Vec<String>,
}

impl NewAnalysisRecord {
    /// Attach the storage-assigned identifier.
    pub fn into_record(self, analysis_id: String) -> AnalysisRecord {
        AnalysisRecord {
            analysis_id,
            user_id: self.user_id,
            plant_id: self.plant_id,
            plant_type_id: self.plant_type_id,
            analysis_date: self.analysis_date,
            current_stage: self.current_stage,
            care_instructions: self.care_instructions,
            next_checkup_date: self.next_checkup_date,
            action_item_ids: self.action_item_ids,
        }
    }
}
