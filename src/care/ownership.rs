//! Plant ownership check.
//!
//! Every operation touching a plant-scoped record runs this first. "Plant
//! does not exist" and "plant belongs to someone else" collapse into the
//! same `NotFound` so callers cannot probe for other users' records.

use crate::error::{CareError, Result};
use crate::models::TrackedPlant;
use crate::storage::CareStore;

/// Return the plant iff it exists and belongs to `user_id`.
pub async fn owned_plant(
    store: &dyn CareStore,
    user_id: &str,
    plant_id: &str,
) -> Result<TrackedPlant> {
    match store.get_plant(plant_id).await? {
        Some(plant) if plant.user_id == user_id => Ok(plant),
        _ => Err(CareError::NotFound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewTrackedPlant;
    use crate::storage::MemoryStore;

    fn new_plant(nickname: &str) -> NewTrackedPlant {
        NewTrackedPlant {
            plant_type_id: "ficus-lyrata".to_string(),
            nickname: nickname.to_string(),
            health_status: None,
        }
    }

    #[tokio::test]
    async fn owner_gets_the_plant() {
        let store = MemoryStore::new();
        let plant = store
            .insert_plant("user-a", new_plant("Fig"))
            .await
            .unwrap();
        let found = owned_plant(&store, "user-a", &plant.plant_id).await.unwrap();
        assert_eq!(found.nickname, "Fig");
    }

    #[tokio::test]
    async fn missing_and_foreign_plants_are_indistinguishable() {
        let store = MemoryStore::new();
        let plant = store
            .insert_plant("user-a", new_plant("Fig"))
            .await
            .unwrap();

        let missing = owned_plant(&store, "user-b", "no-such-plant")
            .await
            .unwrap_err();
        let foreign = owned_plant(&store, "user-b", &plant.plant_id)
            .await
            .unwrap_err();
        assert_eq!(missing.to_string(), foreign.to_string());
        assert!(matches!(missing, CareError::NotFound));
        assert!(matches!(foreign, CareError::NotFound));
    }
}
