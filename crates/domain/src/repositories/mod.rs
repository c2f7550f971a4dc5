//! Repository Abstractions - Domain interfaces for persistence
//!
//! The domain defines these contracts; infrastructure provides the
//! in-memory and SQLite implementations.

mod repository;

pub use repository::{Repository, ScheduleRepository, TasksRepository};
