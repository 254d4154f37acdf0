pub mod config;
pub mod core;
pub mod record;
pub mod store;
pub mod view;

pub use crate::core::filter::TaskFilter;
pub use crate::core::task::{Category, Priority, Task};
pub use crate::record::{RawTaskRecord, normalize, normalize_all};
pub use crate::view::calendar::{CalendarView, mark_calendar};
pub use crate::view::sections::{Section, SectionKind, group};
