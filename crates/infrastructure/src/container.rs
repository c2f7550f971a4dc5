//! Repository wiring
//!
//! Picks the storage backend from configuration and hands out the two
//! repositories as trait objects, so callers never name a backend type.

use anyhow::{Context, Result};
use common::{init_structured_logging, LoggingConfig, OperationTimer};
use domain::config::{AppConfig, SearchConfig, StorageBackend};
use domain::{ScheduleRepository, TasksRepository};
use std::sync::Arc;
use tracing::info;

use crate::config::ConfigLoader;
use crate::persistence::{
    open_pool, InMemoryScheduleRepository, InMemoryTasksRepository, SqliteScheduleRepository,
    SqliteTasksRepository,
};

/// Repositories for one storage backend plus the search limits they serve
#[derive(Clone)]
pub struct RepositoryContainer {
    pub schedules: Arc<dyn ScheduleRepository>,
    pub tasks: Arc<dyn TasksRepository>,
    pub search: SearchConfig,
    backend: StorageBackend,
}

impl RepositoryContainer {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        config
            .validate()
            .map_err(anyhow::Error::new)
            .context("Cannot build repositories from invalid configuration")?;

        let mut container = match config.storage.backend {
            StorageBackend::InMemory => Self::in_memory(),
            StorageBackend::Sqlite => {
                let pool = open_pool(&config.storage.sqlite_path, config.storage.pool_size)?;
                Self {
                    schedules: Arc::new(SqliteScheduleRepository::new(pool.clone())),
                    tasks: Arc::new(SqliteTasksRepository::new(pool)),
                    search: SearchConfig::default(),
                    backend: StorageBackend::Sqlite,
                }
            }
        };
        container.search = config.search.clone();

        info!(backend = %container.backend, "Repositories ready");
        Ok(container)
    }

    /// Fresh, empty in-memory repositories with default search limits
    pub fn in_memory() -> Self {
        Self {
            schedules: Arc::new(InMemoryScheduleRepository::new()),
            tasks: Arc::new(InMemoryTasksRepository::new()),
            search: SearchConfig::default(),
            backend: StorageBackend::InMemory,
        }
    }

    pub fn backend(&self) -> StorageBackend {
        self.backend
    }
}

impl std::fmt::Debug for RepositoryContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryContainer")
            .field("backend", &self.backend)
            .field("search", &self.search)
            .finish_non_exhaustive()
    }
}

/// Load configuration, install logging, then wire the repositories.
///
/// Installs the global tracing subscriber, so call it once per process.
pub async fn bootstrap(loader: &ConfigLoader) -> Result<(AppConfig, RepositoryContainer)> {
    let config = loader.load().await?;

    let logging = LoggingConfig::from_settings(&config.logging.level, config.logging.json_output)?;
    init_structured_logging(logging)?;

    let mut timer = OperationTimer::new("bootstrap");
    timer.add_field("backend", config.storage.backend.as_str());
    let container = timer.finish_with_result(RepositoryContainer::from_config(&config))?;

    Ok((config, container))
}
