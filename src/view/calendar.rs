use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};

use crate::core::task::Task;

/// Canonical `YYYY-MM-DD` key for a calendar day. Derived from the date
/// component alone, never from a timestamp that could drift across a local
/// midnight.
pub type DateKey = String;

pub fn date_key(date: NaiveDate) -> DateKey {
    date.format("%Y-%m-%d").to_string()
}

/// One dot indicator on a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dot {
    /// Completed tasks render muted, active ones highlighted.
    pub completed: bool,
}

/// Decorations for a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DayMark {
    pub dots: Vec<Dot>,
    pub selected: bool,
}

/// Derived calendar state: day decorations plus the selected day's task list.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarView {
    pub marks: BTreeMap<DateKey, DayMark>,
    pub day_tasks: Vec<Task>,
}

/// Derive calendar markings and the selected day's tasks.
///
/// Every task with a due date contributes one dot to that day's mark; dots
/// accumulate, they are never overwritten. The selected day's entry always
/// exists, even when nothing is due on it. `day_tasks` holds the tasks due on
/// `selected`, time ascending with untimed tasks last, ties broken by
/// `created_at` then id. Pure in (tasks, selected): identical inputs produce
/// deep-equal output.
pub fn mark_calendar(tasks: &[Task], selected: NaiveDate) -> CalendarView {
    super::warn_on_mixed_owners(tasks);

    let mut marks: BTreeMap<DateKey, DayMark> = BTreeMap::new();
    for task in tasks {
        if let Some(due) = task.due_date {
            marks
                .entry(date_key(due))
                .or_default()
                .dots
                .push(Dot {
                    completed: task.is_completed,
                });
        }
    }
    marks.entry(date_key(selected)).or_default().selected = true;

    let mut day_tasks: Vec<Task> = tasks
        .iter()
        .filter(|t| t.due_date == Some(selected))
        .cloned()
        .collect();
    day_tasks.sort_by_key(|t| {
        (
            t.time.is_none(),
            t.time.unwrap_or(NaiveTime::MIN),
            t.created_at,
            t.id.clone(),
        )
    });

    CalendarView { marks, day_tasks }
}
