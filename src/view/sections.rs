use std::cmp::Reverse;

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::core::filter::TaskFilter;
use crate::core::task::Task;

/// Fixed section order for the grouped list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Today,
    NextSevenDays,
    OtherDates,
    Completed,
}

impl SectionKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::NextSevenDays => "Next 7 Days",
            Self::OtherDates => "Other Dates",
            Self::Completed => "Completed",
        }
    }
}

/// A named, ordered group of tasks for the sectioned list.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    pub items: Vec<Task>,
}

/// Partition tasks into ordered sections for list display.
///
/// `today` is the caller's current calendar date; the clock never enters here
/// directly, so results are a pure function of (tasks, filter, today).
/// Filtering runs first, then active tasks bucket into Today / Next 7 Days
/// (exclusive of today, inclusive of today+7) / Other Dates, and completed
/// tasks collect into their own trailing section. Only non-empty sections are
/// emitted; an empty or filtered-to-empty input yields an empty list.
///
/// Other Dates holds everything else active: overdue tasks, tasks beyond the
/// horizon, and tasks with no due date. No-date tasks sort after all dated
/// tasks within the bucket.
pub fn group(tasks: &[Task], filter: &TaskFilter, today: NaiveDate) -> Vec<Section> {
    super::warn_on_mixed_owners(tasks);

    let horizon = today + Duration::days(7);

    let mut today_bucket = Vec::new();
    let mut week_bucket = Vec::new();
    let mut other_bucket = Vec::new();
    let mut completed = Vec::new();

    for task in tasks.iter().filter(|t| filter.matches(t)) {
        if task.is_completed {
            completed.push(task.clone());
            continue;
        }
        match task.due_date {
            Some(due) if due == today => today_bucket.push(task.clone()),
            Some(due) if due > today && due <= horizon => week_bucket.push(task.clone()),
            _ => other_bucket.push(task.clone()),
        }
    }

    for bucket in [&mut today_bucket, &mut week_bucket, &mut other_bucket] {
        sort_active(bucket);
    }
    sort_completed(&mut completed);

    let mut sections = Vec::new();
    for (kind, items) in [
        (SectionKind::Today, today_bucket),
        (SectionKind::NextSevenDays, week_bucket),
        (SectionKind::OtherDates, other_bucket),
        (SectionKind::Completed, completed),
    ] {
        if !items.is_empty() {
            sections.push(Section { kind, items });
        }
    }
    sections
}

/// Ascending by (date, time), missing values last, newest-created first on
/// ties. The `NaiveDate::MAX` sentinel places no-date tasks after every dated
/// task; the missing-time flag places untimed tasks after every timed task on
/// the same date.
fn sort_active(bucket: &mut [Task]) {
    bucket.sort_by_key(|t| {
        (
            t.due_date.unwrap_or(NaiveDate::MAX),
            t.time.is_none(),
            t.time.unwrap_or(NaiveTime::MIN),
            Reverse(t.created_at),
        )
    });
}

/// Most recently due first, no-date tasks last, newest-created first on ties.
fn sort_completed(bucket: &mut [Task]) {
    bucket.sort_by_key(|t| {
        (
            Reverse(t.due_date.unwrap_or(NaiveDate::MIN)),
            Reverse(t.created_at),
        )
    });
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    fn task(id: &str, due: Option<(i32, u32, u32)>) -> Task {
        let mut task = Task::new("u1", format!("Task {id}"));
        task.id = id.to_string();
        task.due_date = due.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));
        task.created_at = NaiveDateTime::UNIX_EPOCH;
        task
    }

    fn kinds(sections: &[Section]) -> Vec<SectionKind> {
        sections.iter().map(|s| s.kind).collect()
    }

    #[test]
    fn buckets_by_date() {
        let tasks = vec![
            task("today", Some((2025, 6, 10))),
            task("week", Some((2025, 6, 15))),
            task("far", Some((2025, 6, 20))),
        ];
        let sections = group(&tasks, &TaskFilter::All, today());
        assert_eq!(
            kinds(&sections),
            vec![
                SectionKind::Today,
                SectionKind::NextSevenDays,
                SectionKind::OtherDates
            ]
        );
        assert_eq!(sections[0].items[0].id, "today");
        assert_eq!(sections[1].items[0].id, "week");
        assert_eq!(sections[2].items[0].id, "far");
    }

    #[test]
    fn horizon_is_inclusive() {
        let tasks = vec![
            task("edge", Some((2025, 6, 17))),
            task("past-edge", Some((2025, 6, 18))),
        ];
        let sections = group(&tasks, &TaskFilter::All, today());
        assert_eq!(
            kinds(&sections),
            vec![SectionKind::NextSevenDays, SectionKind::OtherDates]
        );
        assert_eq!(sections[0].items[0].id, "edge");
    }

    #[test]
    fn completed_never_lands_in_today() {
        let mut done = task("done", Some((2025, 6, 10)));
        done.is_completed = true;
        let sections = group(&[done], &TaskFilter::All, today());
        assert_eq!(kinds(&sections), vec![SectionKind::Completed]);
    }

    #[test]
    fn overdue_and_undated_land_in_other_dates() {
        let tasks = vec![task("overdue", Some((2025, 6, 1))), task("undated", None)];
        let sections = group(&tasks, &TaskFilter::All, today());
        assert_eq!(kinds(&sections), vec![SectionKind::OtherDates]);
        // Undated sorts after every dated task.
        assert_eq!(sections[0].items[0].id, "overdue");
        assert_eq!(sections[0].items[1].id, "undated");
    }

    #[test]
    fn sorts_by_time_with_untimed_last() {
        let mut nine = task("nine", Some((2025, 6, 10)));
        nine.time = NaiveTime::from_hms_opt(9, 0, 0);
        let mut fourteen = task("fourteen", Some((2025, 6, 10)));
        fourteen.time = NaiveTime::from_hms_opt(14, 0, 0);
        let untimed = task("untimed", Some((2025, 6, 10)));

        let sections = group(
            &[untimed, fourteen, nine],
            &TaskFilter::All,
            today(),
        );
        let ids: Vec<&str> = sections[0].items.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["nine", "fourteen", "untimed"]);
    }

    #[test]
    fn created_at_breaks_ties_newest_first() {
        let mut older = task("older", Some((2025, 6, 10)));
        older.created_at = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let mut newer = task("newer", Some((2025, 6, 10)));
        newer.created_at = NaiveDate::from_ymd_opt(2025, 6, 5)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();

        let sections = group(&[older.clone(), newer.clone()], &TaskFilter::All, today());
        assert_eq!(sections[0].items[0].id, "newer");
        // Input order must not matter.
        let sections = group(&[newer, older], &TaskFilter::All, today());
        assert_eq!(sections[0].items[0].id, "newer");
    }

    #[test]
    fn completed_sorts_by_due_date_descending() {
        let mut a = task("a", Some((2025, 6, 1)));
        a.is_completed = true;
        let mut b = task("b", Some((2025, 6, 9)));
        b.is_completed = true;
        let mut undated = task("undated", None);
        undated.is_completed = true;

        let sections = group(&[a, undated, b], &TaskFilter::All, today());
        let ids: Vec<&str> = sections[0].items.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "undated"]);
    }

    #[test]
    fn filter_runs_before_grouping() {
        let mut starred = task("starred", Some((2025, 6, 10)));
        starred.is_starred = true;
        let plain = task("plain", Some((2025, 6, 10)));

        let sections = group(&[starred, plain], &TaskFilter::Starred, today());
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].items.len(), 1);
        assert_eq!(sections[0].items[0].id, "starred");
    }

    #[test]
    fn every_input_task_appears_exactly_once() {
        let mut tasks = vec![
            task("t1", Some((2025, 6, 10))),
            task("t2", Some((2025, 6, 12))),
            task("t3", Some((2025, 6, 30))),
            task("t4", None),
            task("t5", Some((2025, 5, 1))),
        ];
        let mut done = task("t6", Some((2025, 6, 10)));
        done.is_completed = true;
        tasks.push(done);

        let sections = group(&tasks, &TaskFilter::All, today());
        let total: usize = sections.iter().map(|s| s.items.len()).sum();
        assert_eq!(total, tasks.len());

        let mut seen: Vec<&str> = sections
            .iter()
            .flat_map(|s| s.items.iter().map(|t| t.id.as_str()))
            .collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), tasks.len());
    }

    #[test]
    fn group_is_idempotent() {
        let tasks = vec![
            task("t1", Some((2025, 6, 10))),
            task("t2", None),
            task("t3", Some((2025, 6, 14))),
        ];
        let first = group(&tasks, &TaskFilter::All, today());
        let second = group(&tasks, &TaskFilter::All, today());
        assert_eq!(first, second);
    }

    #[test]
    fn empty_input_yields_empty_sections() {
        assert!(group(&[], &TaskFilter::All, today()).is_empty());
        assert!(group(&[], &TaskFilter::Starred, today()).is_empty());
    }

    #[test]
    fn filtered_to_empty_yields_empty_sections() {
        let tasks = vec![task("t1", Some((2025, 6, 10)))];
        assert!(group(&tasks, &TaskFilter::Starred, today()).is_empty());
    }
}
