//! SQLite repositories
//!
//! Connections come from an r2d2 pool. Timestamps are stored as epoch
//! milliseconds, identifiers as hyphenated strings. Search is compiled to SQL
//! with `rowid` as the final sort key so ties keep insertion order, matching
//! the in-memory engine.

mod models;
mod query;
mod repository;
mod schema;

pub use models::{RowModel, ScheduleRow, TasksRow};
pub use repository::{SqliteRepository, SqliteScheduleRepository, SqliteTasksRepository};
pub use schema::init_schema;

use anyhow::{Context, Result};
use domain::DomainError;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::ErrorCode;
use std::path::Path;
use tracing::info;

pub type SqlitePool = Pool<SqliteConnectionManager>;

pub const IN_MEMORY_PATH: &str = ":memory:";

/// Open a pool and create the schema.
///
/// `:memory:` gets a single long-lived connection, since every SQLite
/// in-memory connection is its own database.
pub fn open_pool(path: &Path, pool_size: u32) -> Result<SqlitePool> {
    let in_memory = path == Path::new(IN_MEMORY_PATH);
    let manager = if in_memory {
        SqliteConnectionManager::memory()
    } else {
        SqliteConnectionManager::file(path)
    };
    let manager = manager.with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

    let builder = Pool::builder();
    let builder = if in_memory {
        builder.max_size(1).idle_timeout(None).max_lifetime(None)
    } else {
        builder.max_size(pool_size)
    };
    let pool = builder
        .build(manager)
        .context("Failed to create connection pool")?;

    {
        let conn = pool.get().context("Failed to get connection for schema setup")?;
        init_schema(&conn)?;
    }

    info!(path = %path.display(), pool_size = pool.max_size(), "SQLite storage ready");
    Ok(pool)
}

pub(crate) fn connection_error(error: r2d2::Error) -> DomainError {
    DomainError::persistence("acquire connection", error)
}

/// Translate a failed write. Constraint violations become domain errors.
pub(crate) fn write_error(
    operation: &str,
    entity: &'static str,
    id: &str,
    error: rusqlite::Error,
) -> DomainError {
    if let rusqlite::Error::SqliteFailure(failure, _) = &error {
        if failure.code == ErrorCode::ConstraintViolation {
            match failure.extended_code {
                rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY | rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE => {
                    return DomainError::EntityAlreadyExists {
                        entity,
                        id: id.to_string(),
                    };
                }
                rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                    return DomainError::persistence(
                        operation,
                        format!("{entity} {id} references a missing schedule"),
                    );
                }
                _ => {}
            }
        }
    }
    DomainError::persistence(operation, error)
}
