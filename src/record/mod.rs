//! The raw-record boundary: loosely-typed stored task documents and their
//! normalization into canonical [`Task`] values.
//!
//! Stored records are tolerant by design. Due dates arrive as ISO strings,
//! native timestamps, or nothing at all; category and priority are plain
//! strings. Normalization resolves each loose field exactly once, recovers
//! locally from anything malformed (warn and substitute, never fail), and
//! hands the rest of the engine a single canonical shape.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::core::task::{Category, Priority, Task};

/// A due date as it appears in a stored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDate {
    /// Native timestamp: `{ "seconds": …, "nanoseconds": … }`.
    Timestamp { seconds: i64, nanoseconds: u32 },
    /// Milliseconds since the UNIX epoch.
    EpochMillis(i64),
    /// `YYYY-MM-DD`, or a full RFC 3339 instant whose date part is taken.
    Iso(String),
}

impl RawDate {
    /// Resolve to a calendar date. `None` means unparseable, which the
    /// normalizer treats as "no due date".
    pub fn to_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Timestamp {
                seconds,
                nanoseconds,
            } => DateTime::from_timestamp(*seconds, *nanoseconds).map(|dt| dt.date_naive()),
            Self::EpochMillis(millis) => {
                DateTime::from_timestamp_millis(*millis).map(|dt| dt.date_naive())
            }
            Self::Iso(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())),
        }
    }

    /// Resolve to a full timestamp, for `createdAt`-style fields. A bare ISO
    /// date resolves to midnight.
    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Timestamp {
                seconds,
                nanoseconds,
            } => DateTime::from_timestamp(*seconds, *nanoseconds).map(|dt| dt.naive_utc()),
            Self::EpochMillis(millis) => {
                DateTime::from_timestamp_millis(*millis).map(|dt| dt.naive_utc())
            }
            Self::Iso(s) => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.naive_utc())
                .or_else(|| {
                    NaiveDate::parse_from_str(s, "%Y-%m-%d")
                        .ok()
                        .map(|d| d.and_time(NaiveTime::MIN))
                }),
        }
    }
}

/// A stored task document, field names as the store writes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTaskRecord {
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub due_date: Option<RawDate>,
    /// "HH:MM", 24-hour.
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub is_starred: bool,
    /// Reminder offset in minutes before the due instant.
    #[serde(default)]
    pub reminder_time: Option<u32>,
    #[serde(default)]
    pub created_at: Option<RawDate>,
}

/// Convert a stored record into a canonical task.
///
/// Total over any syntactically valid record: malformed fields are replaced
/// with `None` or a default and logged, so one bad document never blocks the
/// rest of the collection.
pub fn normalize(raw: &RawTaskRecord) -> Task {
    let due_date = match &raw.due_date {
        None => None,
        Some(raw_date) => {
            let date = raw_date.to_date();
            if date.is_none() {
                log::warn!("task {}: unparseable due date {:?}, treating as none", raw.id, raw_date);
            }
            date
        }
    };

    let time = match raw.time.as_deref() {
        None | Some("") => None,
        Some(s) => {
            let parsed = NaiveTime::parse_from_str(s, "%H:%M").ok();
            if parsed.is_none() {
                log::warn!("task {}: unparseable time {:?}, treating as none", raw.id, s);
            }
            parsed
        }
    };

    let priority = match raw.priority.as_deref() {
        None => Priority::default(),
        Some(s) => Priority::from_name(s).unwrap_or_else(|| {
            log::warn!("task {}: unknown priority {:?}, using Medium", raw.id, s);
            Priority::default()
        }),
    };

    let category = raw
        .category
        .as_deref()
        .map(Category::from_name)
        .unwrap_or(Category::Personal);

    let created_at = match &raw.created_at {
        None => {
            log::warn!("task {}: missing createdAt, using epoch", raw.id);
            NaiveDateTime::UNIX_EPOCH
        }
        Some(raw_ts) => raw_ts.to_datetime().unwrap_or_else(|| {
            log::warn!("task {}: unparseable createdAt {:?}, using epoch", raw.id, raw_ts);
            NaiveDateTime::UNIX_EPOCH
        }),
    };

    Task {
        id: raw.id.clone(),
        owner_id: raw.user_id.clone(),
        title: raw.title.clone(),
        description: raw.description.clone(),
        category,
        priority,
        due_date,
        time,
        is_completed: raw.is_completed,
        is_starred: raw.is_starred,
        reminder_offset_minutes: raw.reminder_time,
        created_at,
    }
}

/// Normalize a whole snapshot.
pub fn normalize_all(records: &[RawTaskRecord]) -> Vec<Task> {
    records.iter().map(normalize).collect()
}
