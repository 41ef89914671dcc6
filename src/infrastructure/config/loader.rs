use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types.
///
/// These are fatal at construction time: a host refusing to start on bad
/// configuration beats one evaluating against nonsense thresholds.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid performance_threshold: {0}. Must be within (0.0, 1.0]")]
    InvalidPerformanceThreshold(f64),

    #[error("Invalid evaluation_interval_hours: {0}. Must be positive")]
    InvalidEvaluationInterval(f64),

    #[error("Invalid clarification_threshold: {0}. Must be within (0.0, 1.0]")]
    InvalidClarificationThreshold(f64),

    #[error("Invalid default_time_window_hours: {0}. Must be positive")]
    InvalidTimeWindow(f64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Database path cannot be empty")]
    EmptyDatabasePath,

    #[error("Invalid max_connections: {0}. Must be at least 1")]
    InvalidMaxConnections(u32),

    #[error("Metrics API base_url cannot be empty")]
    EmptyMetricsBaseUrl,
}

/// Configuration loader with hierarchical merging.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .reforge/config.yaml (project config)
    /// 3. .reforge/local.yaml (project local overrides, optional)
    /// 4. Environment variables (REFORGE_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".reforge/config.yaml"))
            .merge(Yaml::file(".reforge/local.yaml"))
            .merge(Env::prefixed("REFORGE_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&config.scheduler.performance_threshold)
            || config.scheduler.performance_threshold == 0.0
        {
            return Err(ConfigError::InvalidPerformanceThreshold(
                config.scheduler.performance_threshold,
            ));
        }

        if config.scheduler.evaluation_interval_hours <= 0.0 {
            return Err(ConfigError::InvalidEvaluationInterval(
                config.scheduler.evaluation_interval_hours,
            ));
        }

        if !(0.0..=1.0).contains(&config.evaluator.performance_threshold)
            || config.evaluator.performance_threshold == 0.0
        {
            return Err(ConfigError::InvalidPerformanceThreshold(
                config.evaluator.performance_threshold,
            ));
        }

        if config.evaluator.default_time_window_hours <= 0.0 {
            return Err(ConfigError::InvalidTimeWindow(
                config.evaluator.default_time_window_hours,
            ));
        }

        if !(0.0..=1.0).contains(&config.refiner.clarification_threshold)
            || config.refiner.clarification_threshold == 0.0
        {
            return Err(ConfigError::InvalidClarificationThreshold(
                config.refiner.clarification_threshold,
            ));
        }

        if config.database.path.is_empty() {
            return Err(ConfigError::EmptyDatabasePath);
        }

        if config.database.max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections(
                config.database.max_connections,
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        if let Some(ref metrics) = config.metrics_api {
            if metrics.base_url.is_empty() {
                return Err(ConfigError::EmptyMetricsBaseUrl);
            }
        }

        Ok(())
    }
}
