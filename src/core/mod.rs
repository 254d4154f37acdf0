pub mod filter;
pub mod reminder;
pub mod task;
