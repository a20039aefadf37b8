//! Canonical display ordering of a task set.
//!
//! Total order by successive tie-breaks: status class, then overdue flag,
//! then priority, then due date ascending; stable beyond that, so records
//! equal on all four keys keep their storage order. The sort instant is
//! taken once per call and used for every overdue evaluation — re-reading
//! the clock per comparison could produce an inconsistent order within a
//! single sort.

use chrono::{DateTime, Utc};

use crate::models::CareTask;

/// Sort `tasks` in place into canonical display order, evaluating
/// overdue-ness against `now`.
pub fn sort_tasks_for_display(tasks: &mut [CareTask], now: DateTime<Utc>) {
    tasks.sort_by_key(|task| {
        (
            task.status.sort_class(),
            u8::from(!task.is_overdue_at(now)),
            task.priority.urgency_rank(),
            task.due_date,
        )
    });
}
