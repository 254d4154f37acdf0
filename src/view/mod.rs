//! View derivation: sectioned task lists and calendar markings. Everything
//! here is a pure function of its arguments; callers re-invoke on each store
//! update and pass "today" in explicitly.

pub mod calendar;
pub mod sections;

use crate::core::task::Task;

/// Ownership scoping is the upstream collaborator's contract. If tasks with
/// mixed owners leak in anyway we pass them through unfiltered, but flag the
/// violation: hard in debug builds, a warning in release.
pub(crate) fn warn_on_mixed_owners(tasks: &[Task]) {
    let Some(first) = tasks.first() else { return };
    let mixed = tasks.iter().any(|t| t.owner_id != first.owner_id);
    debug_assert!(!mixed, "task collection spans multiple owners");
    if mixed {
        log::warn!("task collection spans multiple owners; upstream owner filtering is broken");
    }
}
