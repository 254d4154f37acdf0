use super::task::{Category, Priority, Task};

/// Predicate applied to the task collection before grouping. Mirrors the
/// filter chips the list screen offers: all, one category, one priority, or
/// starred only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TaskFilter {
    #[default]
    All,
    Category(Category),
    Priority(Priority),
    Starred,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => task.category == *category,
            Self::Priority(priority) => task.priority == *priority,
            Self::Starred => task.is_starred,
        }
    }
}
