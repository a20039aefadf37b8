//! Individual task operations: list, direct creation, status updates, and
//! deletion.
//!
//! Every operation is scoped to the calling user; a task that exists under
//! another user is reported exactly like a task that does not exist.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::ownership::owned_plant;
use super::sorting::sort_tasks_for_display;
use crate::error::{CareError, Result};
use crate::models::{generate_task_id, CareTask, NewCareTask, TaskDraft, TaskStatus};
use crate::storage::{CareStore, TaskScope};

/// Listing scope as submitted by callers. Callers typically pass one of the
/// three, but any combination (including none: all of the user's tasks)
/// intersects.
#[derive(Debug, Clone, Default)]
pub struct ListScope {
    pub plant_id: Option<String>,
    pub analysis_id: Option<String>,
    pub status: Option<TaskStatus>,
}

/// List the caller's tasks in canonical display order.
///
/// A plant scope is ownership-checked and an analysis scope resolved under
/// the caller first, so scoping to an unknown or foreign target is
/// `NotFound` rather than an empty list. `now` is the sort instant for
/// overdue evaluation, taken once by the caller.
pub async fn list_tasks(
    store: &dyn CareStore,
    user_id: &str,
    scope: ListScope,
    now: DateTime<Utc>,
) -> Result<Vec<CareTask>> {
    if let Some(plant_id) = &scope.plant_id {
        owned_plant(store, user_id, plant_id).await?;
    }
    if let Some(analysis_id) = &scope.analysis_id {
        store
            .get_analysis(analysis_id, user_id)
            .await?
            .ok_or(CareError::NotFound)?;
    }

    let mut tasks = store
        .list_tasks(
            user_id,
            &TaskScope {
                plant_id: scope.plant_id,
                analysis_id: scope.analysis_id,
                status: scope.status,
            },
        )
        .await?;
    sort_tasks_for_display(&mut tasks, now);
    debug!(user_id = %user_id, count = tasks.len(), "listed tasks");
    Ok(tasks)
}

/// Create tasks directly for a plant (outside any analysis batch).
///
/// Each draft gets a fresh identifier, `pending` status, and `created_date`
/// stamped to `now`. Returns the number created.
pub async fn create_tasks(
    store: &dyn CareStore,
    user_id: &str,
    plant_id: &str,
    drafts: Vec<TaskDraft>,
    now: DateTime<Utc>,
) -> Result<usize> {
    let plant = owned_plant(store, user_id, plant_id).await?;

    let new_tasks: Vec<NewCareTask> = drafts
        .into_iter()
        .map(|draft| {
            NewCareTask::from_draft(
                draft,
                generate_task_id(now),
                user_id,
                &plant.plant_id,
                &plant.plant_type_id,
                None,
                now,
            )
        })
        .collect();
    let created = store.insert_tasks(new_tasks).await?;
    info!(
        user_id = %user_id,
        plant_id = %plant.plant_id,
        count = created,
        "tasks created"
    );
    Ok(created)
}

/// Apply a status change to one task.
///
/// Terminal statuses stamp `completed_date`; any other status clears it, so
/// the completion timestamp is present exactly while the task is resolved.
/// A transition out of a terminal status back to `pending` is deliberately
/// allowed (passthrough, not validated). A supplied comment overwrites the
/// stored one — comments are not appended or versioned. `updated_date` is
/// stamped on every call.
pub async fn update_task_status(
    store: &dyn CareStore,
    user_id: &str,
    task_id: &str,
    new_status: TaskStatus,
    comment: Option<String>,
    now: DateTime<Utc>,
) -> Result<CareTask> {
    let mut task = store
        .find_task(task_id, user_id)
        .await?
        .ok_or(CareError::NotFound)?;

    task.completed_date = new_status.is_terminal().then_some(now);
    task.status = new_status;
    if let Some(comment) = comment {
        task.comment = Some(comment);
    }
    task.updated_date = Some(now);

    store.update_task(&task).await?;
    info!(
        user_id = %user_id,
        task_id = %task.task_id,
        status = %task.status,
        "task status updated"
    );
    Ok(task)
}

/// Hard-delete one task.
///
/// The identifier is NOT removed from any parent analysis record's
/// `action_item_ids`: that list is a best-effort index and readers drop
/// entries that no longer resolve.
pub async fn delete_task(store: &dyn CareStore, user_id: &str, task_id: &str) -> Result<()> {
    if store.delete_task(task_id, user_id).await? {
        info!(user_id = %user_id, task_id = %task_id, "task deleted");
        Ok(())
    } else {
        Err(CareError::NotFound)
    }
}
