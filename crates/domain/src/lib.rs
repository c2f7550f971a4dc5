//! Domain Layer - scheduling business logic
//!
//! Contains ONLY pure business logic with no dependencies on:
//! - Infrastructure (databases, file systems)
//! - Frameworks (web, DI containers)
//!
//! Clean Architecture principles:
//! - Entities: Schedule and Tasks, self-validating through rule tables
//! - Value Objects: Identifier, TasksType, TimeRange
//! - Repository Abstractions: interfaces for persistence
//! - Search: filtering, stable ordering and pagination shared by every backend

pub mod config;
pub mod entities;
pub mod errors;
pub mod repositories;
pub mod search;
pub mod time;
pub mod validation;
pub mod value_objects;

#[cfg(any(test, feature = "test-utils"))]
pub mod fakes;

// Re-export core domain types
pub use config::{AppConfig, LoggingSettings, SearchConfig, StorageBackend, StorageConfig};
pub use entities::{
    Entity, Schedule, ScheduleFilter, ScheduleProps, ScheduleSortField, Tasks, TasksFilter, TasksProps,
    TasksSortField,
};
pub use errors::{DomainError, DomainResult, ErrorCategory};
pub use repositories::{Repository, ScheduleRepository, TasksRepository};
pub use search::{search, RawSearchParams, SearchParams, SearchResult, Searchable, SortDirection, SortField};
pub use time::Timestamp;
pub use validation::Notification;
pub use value_objects::{Identifier, TasksType, TimeRange, ValueObject};

pub type ScheduleSearchParams = SearchParams<ScheduleFilter, ScheduleSortField>;
pub type TasksSearchParams = SearchParams<TasksFilter, TasksSortField>;
