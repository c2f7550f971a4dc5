#[cfg(test)]
mod tests {
    use domain::config::*;
    use infrastructure::config::ConfigLoader;
    use std::env;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use tokio::fs;

    #[tokio::test]
    async fn test_default_config_creation() {
        let config = AppConfig::default();

        assert_eq!(config.storage.backend, StorageBackend::InMemory);
        assert_eq!(config.storage.sqlite_path, PathBuf::from("scheduler.db"));
        assert_eq!(config.search.default_per_page, 15);
        assert_eq!(config.search.max_per_page, 100);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[tokio::test]
    async fn test_missing_file_falls_back_to_defaults() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let loader = ConfigLoader::from_path(temp_dir.path().join("absent.toml")).with_env_prefix("SCHED_T0_");

        let config = loader.load().await?;
        assert_eq!(config, AppConfig::default());

        Ok(())
    }

    #[tokio::test]
    async fn test_config_loader_from_toml() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("scheduler.toml");

        let toml_content = r#"
[search]
default_per_page = 20
max_per_page = 200

[storage]
backend = "sqlite"
sqlite_path = "data/schedules.db"

[logging]
level = "debug"
"#;

        fs::write(&config_path, toml_content).await?;

        let loader = ConfigLoader::from_path(config_path).with_env_prefix("SCHED_T1_");
        let config = loader.load().await?;

        assert_eq!(config.search.default_per_page, 20);
        assert_eq!(config.search.max_per_page, 200);
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.storage.sqlite_path, PathBuf::from("data/schedules.db"));
        assert_eq!(config.storage.pool_size, 4);
        assert_eq!(config.logging.level, "debug");

        Ok(())
    }

    #[tokio::test]
    async fn test_config_loader_from_json() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("scheduler.json");

        let json_content = r#"{
  "storage": {
    "backend": "in_memory",
    "pool_size": 8
  },
  "logging": {
    "json_output": true
  }
}"#;

        fs::write(&config_path, json_content).await?;

        let loader = ConfigLoader::from_path(config_path).with_env_prefix("SCHED_T2_");
        let config = loader.load().await?;

        assert_eq!(config.storage.backend, StorageBackend::InMemory);
        assert_eq!(config.storage.pool_size, 8);
        assert!(config.logging.json_output);
        assert_eq!(config.search, SearchConfig::default());

        Ok(())
    }

    #[tokio::test]
    async fn test_unparseable_file_is_skipped() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let broken = temp_dir.path().join("broken.toml");
        let good = temp_dir.path().join("good.toml");
        fs::write(&broken, "[search\nmax_per_page = ").await?;
        fs::write(&good, "[search]\nmax_per_page = 40\n").await?;

        let loader = ConfigLoader::from_path(good).with_path(broken).with_env_prefix("SCHED_T3_");
        let config = loader.load().await?;

        assert_eq!(config.search.max_per_page, 40);

        Ok(())
    }

    #[tokio::test]
    async fn test_env_override() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("scheduler.toml");
        fs::write(&config_path, "[logging]\nlevel = \"warn\"\n").await?;

        env::set_var("SCHED_T4_STORAGE_BACKEND", "sqlite");
        env::set_var("SCHED_T4_SQLITE_PATH", ":memory:");
        env::set_var("SCHED_T4_POOL_SIZE", "2");
        env::set_var("SCHED_T4_MAX_PER_PAGE", "50");
        env::set_var("SCHED_T4_LOG_LEVEL", "trace");
        env::set_var("SCHED_T4_LOG_JSON", "yes");

        let loader = ConfigLoader::from_path(config_path).with_env_prefix("SCHED_T4_");
        let config = loader.load().await?;

        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.storage.sqlite_path, PathBuf::from(":memory:"));
        assert_eq!(config.storage.pool_size, 2);
        assert_eq!(config.search.max_per_page, 50);
        assert_eq!(config.logging.level, "trace");
        assert!(config.logging.json_output);

        // Clean up
        for name in [
            "STORAGE_BACKEND",
            "SQLITE_PATH",
            "POOL_SIZE",
            "MAX_PER_PAGE",
            "LOG_LEVEL",
            "LOG_JSON",
        ] {
            env::remove_var(format!("SCHED_T4_{name}"));
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_env_value_is_an_error() {
        env::set_var("SCHED_T5_POOL_SIZE", "many");

        let loader = ConfigLoader::from_path("does-not-exist.toml").with_env_prefix("SCHED_T5_");
        let result = loader.load().await;

        env::remove_var("SCHED_T5_POOL_SIZE");

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("POOL_SIZE"));
    }

    #[tokio::test]
    async fn test_config_validation_rejects_inconsistent_paging() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("scheduler.toml");
        fs::write(&config_path, "[search]\ndefault_per_page = 30\nmax_per_page = 10\n").await?;

        let loader = ConfigLoader::from_path(config_path).with_env_prefix("SCHED_T6_");
        let result = loader.load().await;

        assert!(result.is_err());
        assert!(format!("{:#}", result.unwrap_err()).contains("default_per_page"));

        Ok(())
    }

    #[tokio::test]
    async fn test_save_config() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nested").join("saved.toml");

        let mut config = AppConfig::default();
        config.storage.backend = StorageBackend::Sqlite;
        config.search.max_per_page = 999;

        let loader = ConfigLoader::from_path(&config_path).with_env_prefix("SCHED_T7_");
        loader.save_config(&config, &config_path).await?;

        let content = fs::read_to_string(&config_path).await?;
        assert!(content.contains("sqlite"));
        assert!(content.contains("999"));

        // Read back through the loader
        let reloaded = loader.load().await?;
        assert_eq!(reloaded, config);

        Ok(())
    }

    #[tokio::test]
    async fn test_save_config_as_json() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("saved.json");

        let mut config = AppConfig::default();
        config.logging.json_output = true;

        let loader = ConfigLoader::from_path(&config_path).with_env_prefix("SCHED_T8_");
        loader.save_config(&config, &config_path).await?;

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&config_path).await?)?;
        assert_eq!(value["logging"]["json_output"], true);
        assert_eq!(value["storage"]["backend"], "in_memory");

        Ok(())
    }

    #[tokio::test]
    async fn test_generate_example_config() -> anyhow::Result<()> {
        let example = ConfigLoader::generate_example_config()?;

        assert!(example.starts_with("# Scheduler configuration"));
        assert!(example.contains("[search]"));
        assert!(example.contains("[storage]"));
        assert!(example.contains("[logging]"));

        let parsed: AppConfig = toml::from_str(&example)?;
        assert_eq!(parsed, AppConfig::default());

        Ok(())
    }

    #[test]
    fn test_default_search_paths() {
        let loader = ConfigLoader::new();
        let paths = loader.config_paths();

        assert_eq!(paths[0], PathBuf::from("scheduler.toml"));
        assert_eq!(paths[1], PathBuf::from("scheduler.json"));
    }
}
