use anyhow::{anyhow, Context, Result};
use domain::config::{AppConfig, StorageBackend};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::fs;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    Default,
}

pub struct ConfigLoader {
    config_paths: Vec<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_paths: Self::default_config_paths(),
            env_prefix: "SCHEDULER_".to_string(),
        }
    }

    /// Search only the given path; used by tests and explicit `--config` style callers
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_paths: vec![path.into()],
            env_prefix: "SCHEDULER_".to_string(),
        }
    }

    /// Check `path` before the default locations
    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.config_paths.insert(0, path);
        self
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn config_paths(&self) -> &[PathBuf] {
        &self.config_paths
    }

    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("scheduler.toml"), PathBuf::from("scheduler.json")];

        if let Some(home_dir) = dirs::home_dir() {
            let config_dir = home_dir.join(".config").join("scheduler");
            paths.push(config_dir.join("config.toml"));
            paths.push(config_dir.join("config.json"));
        }

        paths
    }

    /// First readable file wins, then environment overrides, then validation
    pub async fn load(&self) -> Result<AppConfig> {
        let (config, source) = self.load_base_config().await;
        debug!(?source, "Base configuration resolved");

        let config = self.apply_env_overrides(config)?;
        config.validate().map_err(|e| anyhow!(e)).context("Configuration is invalid")?;

        Ok(config)
    }

    async fn load_base_config(&self) -> (AppConfig, ConfigSource) {
        for path in &self.config_paths {
            if !path.exists() {
                continue;
            }
            match self.load_file(path).await {
                Ok(config) => {
                    info!("Loaded configuration from: {}", path.display());
                    return (config, ConfigSource::File(path.clone()));
                }
                Err(e) => {
                    warn!("Failed to load config from {}: {:#}", path.display(), e);
                }
            }
        }
        (AppConfig::default(), ConfigSource::Default)
    }

    async fn load_file(&self, path: &Path) -> Result<AppConfig> {
        let content = fs::read_to_string(path)
            .await
            .context("Failed to read config file")?;

        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

        match extension {
            "toml" => toml::from_str(&content).context("Failed to parse TOML config"),
            "json" => serde_json::from_str(&content).context("Failed to parse JSON config"),
            _ => toml::from_str(&content)
                .or_else(|_| serde_json::from_str(&content))
                .context("Failed to parse config file"),
        }
    }

    fn env_var(&self, name: &str) -> Option<String> {
        env::var(format!("{}{}", self.env_prefix, name))
            .ok()
            .filter(|v| !v.trim().is_empty())
    }

    fn apply_env_overrides(&self, mut config: AppConfig) -> Result<AppConfig> {
        // Storage settings
        if let Some(backend) = self.env_var("STORAGE_BACKEND") {
            config.storage.backend = StorageBackend::from_str(&backend).map_err(|e| anyhow!(e))?;
        }

        if let Some(path) = self.env_var("SQLITE_PATH") {
            config.storage.sqlite_path = PathBuf::from(path);
        }

        if let Some(size) = self.env_var("POOL_SIZE") {
            config.storage.pool_size = parse_env("POOL_SIZE", &size)?;
        }

        // Search settings
        if let Some(per_page) = self.env_var("DEFAULT_PER_PAGE") {
            config.search.default_per_page = parse_env("DEFAULT_PER_PAGE", &per_page)?;
        }

        if let Some(max) = self.env_var("MAX_PER_PAGE") {
            config.search.max_per_page = parse_env("MAX_PER_PAGE", &max)?;
        }

        // Logging settings
        if let Some(log_level) = self.env_var("LOG_LEVEL") {
            config.logging.level = log_level;
        }

        if let Some(json) = self.env_var("LOG_JSON") {
            config.logging.json_output = matches!(json.to_lowercase().as_str(), "true" | "1" | "yes");
        }

        Ok(config)
    }

    pub async fn save_config(&self, config: &AppConfig, path: &Path) -> Result<()> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("toml");

        let content = match extension {
            "json" => serde_json::to_string_pretty(config)?,
            _ => toml::to_string_pretty(config)?,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(path, content).await?;
        info!("Configuration saved to: {}", path.display());

        Ok(())
    }

    /// Commented TOML with every setting at its default
    pub fn generate_example_config() -> Result<String> {
        let body = toml::to_string_pretty(&AppConfig::default()).context("Failed to render example config")?;
        Ok(format!(
            "# Scheduler configuration\n# Any value can be overridden with SCHEDULER_<NAME> environment variables\n\n{body}"
        ))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_env<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| anyhow!("Environment override {name} has invalid value '{value}'"))
}
