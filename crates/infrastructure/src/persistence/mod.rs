//! Repository implementations
//!
//! Both backends satisfy the same domain contracts and return identical
//! search pages for identical data.

pub mod in_memory;
pub mod sqlite;

pub use in_memory::{InMemoryRepository, InMemoryScheduleRepository, InMemoryTasksRepository};
pub use sqlite::{open_pool, SqlitePool, SqliteRepository, SqliteScheduleRepository, SqliteTasksRepository};
