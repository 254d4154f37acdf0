use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task category. The stored set is open-ended: names we don't recognize are
/// carried through as `Other` and displayed generically, never rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Personal,
    Work,
    Study,
    Health,
    Other(String),
}

impl Category {
    pub fn name(&self) -> &str {
        match self {
            Self::Personal => "Personal",
            Self::Work => "Work",
            Self::Study => "Study",
            Self::Health => "Health",
            Self::Other(name) => name,
        }
    }

    pub fn from_name(s: &str) -> Self {
        match s {
            "Personal" => Self::Personal,
            "Work" => Self::Work,
            "Study" => Self::Study,
            "Health" => Self::Health,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Self::from_name(&s)
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.name().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "Low" => Some(Self::Low),
            "Medium" => Some(Self::Medium),
            "High" => Some(Self::High),
            _ => None,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

/// Canonical in-memory task. Built once per view pass by the normalizer and
/// treated as immutable downstream; edits go through the store, never through
/// the view engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned document id. `Task::new` seeds a UUID for tasks that
    /// have not been persisted yet.
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    /// Minute-precision due time. Independent of `due_date`: a time with no
    /// date is ignored for bucketing, a date with no time sorts last within
    /// its bucket.
    pub time: Option<NaiveTime>,
    pub is_completed: bool,
    pub is_starred: bool,
    /// Minutes before the due date/time at which a reminder should fire.
    pub reminder_offset_minutes: Option<u32>,
    pub created_at: NaiveDateTime,
}

impl Task {
    pub fn new(owner_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.into(),
            title: title.into(),
            description: String::new(),
            category: Category::Personal,
            priority: Priority::default(),
            due_date: None,
            time: None,
            is_completed: false,
            is_starred: false,
            reminder_offset_minutes: None,
            created_at: chrono::Local::now().naive_local(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.is_completed
    }

    /// The resolved due instant, if the task has a due date. An absent time
    /// resolves to midnight.
    pub fn due_at(&self) -> Option<NaiveDateTime> {
        self.due_date
            .map(|date| date.and_time(self.time.unwrap_or(NaiveTime::MIN)))
    }
}
