use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::{DomainError, DomainResult};
use crate::search::{DEFAULT_PER_PAGE, PER_PAGE_CEILING};

/// Root application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Paging limits applied to caller-supplied search input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_per_page")]
    pub default_per_page: usize,

    #[serde(default = "default_max_per_page")]
    pub max_per_page: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    InMemory,
    Sqlite,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::InMemory => "in_memory",
            StorageBackend::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageBackend {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(StorageBackend::InMemory),
            "sqlite" => Ok(StorageBackend::Sqlite),
            other => Err(DomainError::InvalidConfig(format!("unknown storage backend '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Database file; `:memory:` keeps the database in process
    #[serde(default = "default_sqlite_path")]
    pub sqlite_path: PathBuf,

    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json_output: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_per_page: default_per_page(),
            max_per_page: default_max_per_page(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            sqlite_path: default_sqlite_path(),
            pool_size: default_pool_size(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_output: false,
        }
    }
}

impl AppConfig {
    /// Reject inconsistent settings before anything is wired up
    pub fn validate(&self) -> DomainResult<()> {
        let search = &self.search;
        if search.max_per_page == 0 || search.max_per_page > PER_PAGE_CEILING {
            return Err(DomainError::InvalidConfig(format!(
                "search.max_per_page must be between 1 and {PER_PAGE_CEILING}"
            )));
        }
        if search.default_per_page == 0 || search.default_per_page > search.max_per_page {
            return Err(DomainError::InvalidConfig(
                "search.default_per_page must be between 1 and search.max_per_page".to_string(),
            ));
        }
        if self.storage.pool_size == 0 {
            return Err(DomainError::InvalidConfig(
                "storage.pool_size must be positive".to_string(),
            ));
        }
        if self.storage.backend == StorageBackend::Sqlite && self.storage.sqlite_path.as_os_str().is_empty() {
            return Err(DomainError::InvalidConfig(
                "storage.sqlite_path is required for the sqlite backend".to_string(),
            ));
        }
        if !matches!(
            self.logging.level.to_lowercase().as_str(),
            "trace" | "debug" | "info" | "warn" | "error"
        ) {
            return Err(DomainError::InvalidConfig(format!(
                "unknown log level '{}'",
                self.logging.level
            )));
        }
        Ok(())
    }
}

fn default_per_page() -> usize {
    DEFAULT_PER_PAGE
}

fn default_max_per_page() -> usize {
    100
}

fn default_sqlite_path() -> PathBuf {
    PathBuf::from("scheduler.db")
}

fn default_pool_size() -> u32 {
    4
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.search.default_per_page, 15);
        assert_eq!(config.search.max_per_page, 100);
        assert_eq!(config.storage.backend, StorageBackend::InMemory);
    }

    #[test]
    fn test_validate_rejects_bad_paging() {
        let mut config = AppConfig::default();
        config.search.default_per_page = 200;
        assert!(matches!(config.validate(), Err(DomainError::InvalidConfig(_))));

        let mut config = AppConfig::default();
        config.search.max_per_page = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{ "storage": { "backend": "sqlite" } }"#).unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.storage.pool_size, 4);
        assert_eq!(config.search, SearchConfig::default());
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("SQLite".parse::<StorageBackend>().unwrap(), StorageBackend::Sqlite);
        assert_eq!("memory".parse::<StorageBackend>().unwrap(), StorageBackend::InMemory);
        assert!("postgres".parse::<StorageBackend>().is_err());
    }
}
