//! Domain Entities - Core business objects
//!
//! Entities carry identity and validate their own business rules.
//! Independent of infrastructure concerns.

mod entity;
mod json;
pub mod schedule;
pub mod tasks;

pub use entity::Entity;
pub use schedule::{Schedule, ScheduleFilter, ScheduleProps, ScheduleSortField};
pub use tasks::{Tasks, TasksFilter, TasksProps, TasksSortField, MAX_DURATION_MINUTES};
