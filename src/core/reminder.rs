use chrono::{Duration, NaiveDateTime};
use thiserror::Error;

use super::task::Task;

/// A notification request handed to the platform scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRequest {
    pub task_id: String,
    pub fire_at: NaiveDateTime,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("notification permission not granted")]
    PermissionDenied,
    #[error("platform scheduler failed: {0}")]
    Platform(String),
}

/// Platform side of reminder delivery. The engine only computes requests;
/// the application wires in an implementation backed by the OS notification
/// API.
pub trait ReminderScheduler {
    fn schedule(&mut self, request: ReminderRequest) -> Result<(), ScheduleError>;
}

/// The instant at which this task's reminder should fire: the resolved due
/// instant minus the reminder offset. `None` when the task has no due date or
/// no offset. An absent time resolves to midnight, per `Task::due_at`.
pub fn trigger_instant(task: &Task) -> Option<NaiveDateTime> {
    let due = task.due_at()?;
    let offset = task.reminder_offset_minutes?;
    Some(due - Duration::minutes(i64::from(offset)))
}

/// Build the notification request for `task`, or `None` when no reminder is
/// configured or the trigger instant is not strictly in the future. Past-due
/// triggers are skipped silently: no notification, no error.
pub fn reminder_request(task: &Task, now: NaiveDateTime) -> Option<ReminderRequest> {
    let fire_at = trigger_instant(task)?;
    if fire_at <= now {
        return None;
    }
    let due = task.due_at()?;
    Some(ReminderRequest {
        task_id: task.id.clone(),
        fire_at,
        title: format!("Task reminder: {}", task.title),
        body: format!(
            "Your task \"{}\" is scheduled for {} on {}.",
            task.title,
            due.format("%H:%M"),
            due.format("%Y-%m-%d"),
        ),
    })
}
