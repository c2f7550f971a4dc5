//! Infrastructure Layer
//!
//! Adapters behind the domain contracts:
//! - layered configuration loading (file, then environment)
//! - in-memory and SQLite repositories
//! - the repository container that wires a backend from configuration

pub mod config;
pub mod container;
pub mod persistence;

pub use config::{ConfigLoader, ConfigSource};
pub use container::{bootstrap, RepositoryContainer};
pub use persistence::{
    InMemoryScheduleRepository, InMemoryTasksRepository, SqliteScheduleRepository, SqliteTasksRepository,
};
