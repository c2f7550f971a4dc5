use anyhow::{anyhow, Context};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Instant;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Subscriber settings for structured logging
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level when `RUST_LOG` is not set
    pub level: Level,
    /// One JSON object per event instead of human-readable lines
    pub json_output: bool,
    /// ANSI colors (human-readable output only)
    pub color_output: bool,
    pub include_line_numbers: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            json_output: false,
            color_output: true,
            include_line_numbers: cfg!(debug_assertions),
        }
    }
}

impl LoggingConfig {
    /// Build from the textual level stored in application settings
    pub fn from_settings(level: &str, json_output: bool) -> anyhow::Result<Self> {
        let level = Level::from_str(level.trim()).map_err(|_| anyhow!("unknown log level '{level}'"))?;
        Ok(Self {
            level,
            json_output,
            color_output: !json_output,
            ..Self::default()
        })
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init_structured_logging(config: LoggingConfig) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));

    if config.json_output {
        let json_layer = fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false);

        let subscriber = Registry::default().with(env_filter).with(json_layer);
        tracing::subscriber::set_global_default(subscriber).context("failed to install JSON logging")?;
    } else {
        let fmt_layer = fmt::layer()
            .with_target(true)
            .with_line_number(config.include_line_numbers)
            .with_ansi(config.color_output)
            .with_span_events(FmtSpan::CLOSE);

        let subscriber = Registry::default().with(env_filter).with(fmt_layer);
        tracing::subscriber::set_global_default(subscriber).context("failed to install logging")?;
    }

    Ok(())
}

/// Measures one operation and logs its duration and outcome
pub struct OperationTimer {
    start: Instant,
    operation_name: String,
    fields: BTreeMap<String, Value>,
}

impl OperationTimer {
    pub fn new(operation_name: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            operation_name: operation_name.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn add_field(&mut self, key: impl Into<String>, value: impl Serialize) {
        if let Ok(v) = serde_json::to_value(value) {
            self.fields.insert(key.into(), v);
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    pub fn finish(self) {
        let _ = self.finish_with_result(Ok::<(), String>(()));
    }

    /// Log success or failure of `result` and hand it back
    pub fn finish_with_result<T, E: Display>(self, result: Result<T, E>) -> Result<T, E> {
        let duration_ms = self.elapsed_ms();
        let fields = Value::from(serde_json::Map::from_iter(self.fields));

        match &result {
            Ok(_) => tracing::info!(
                operation = %self.operation_name,
                duration_ms,
                success = true,
                fields = %fields,
                "Operation completed"
            ),
            Err(e) => tracing::error!(
                operation = %self.operation_name,
                duration_ms,
                success = false,
                error = %e,
                fields = %fields,
                "Operation failed"
            ),
        }
        result
    }
}
