//! Tracked plant records.
//!
//! A `TrackedPlant` is a user's instance of a catalog plant type. The
//! lifecycle engine reads these for ownership checks; creation and metadata
//! updates are plain single-record writes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's tracked plant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedPlant {
    /// Storage-assigned opaque identifier.
    pub plant_id: String,
    /// Owning user identifier.
    pub user_id: String,
    /// Catalog plant-type reference.
    pub plant_type_id: String,
    /// Display nickname.
    pub nickname: String,
    /// Free-form health status, defaults to `"healthy"`.
    pub health_status: String,
    pub created_date: DateTime<Utc>,
}

/// Payload for creating a tracked plant (storage assigns the identifier).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrackedPlant {
    pub plant_type_id: String,
    pub nickname: String,
    #[serde(default)]
    pub health_status: Option<String>,
}

impl NewTrackedPlant {
    /// Health status to persist, falling back to the default.
    pub fn health_status_or_default(&self) -> String {
        self.health_status
            .clone()
            .unwrap_or_else(|| "healthy".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_status_defaults_to_healthy() {
        let new_plant = NewTrackedPlant {
            plant_type_id: "monstera-deliciosa".to_string(),
            nickname: "Monty".to_string(),
            health_status: None,
        };
        assert_eq!(new_plant.health_status_or_default(), "healthy");
    }

    #[test]
    fn explicit_health_status_wins() {
        let new_plant = NewTrackedPlant {
            plant_type_id: "monstera-deliciosa".to_string(),
            nickname: "Monty".to_string(),
            health_status: Some("wilting".to_string()),
        };
        assert_eq!(new_plant.health_status_or_default(), "wilting");
    }
}
