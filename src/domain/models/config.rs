use serde::{Deserialize, Serialize};

/// Main configuration structure for Reforge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Evaluation scheduler configuration.
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Performance evaluator configuration.
    #[serde(default)]
    pub evaluator: EvaluatorConfig,

    /// Prompt refiner configuration.
    #[serde(default)]
    pub refiner: RefinerConfig,

    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Metrics API configuration (optional; absent means a host-injected
    /// metrics source is expected).
    #[serde(default)]
    pub metrics_api: Option<MetricsApiConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scheduler: SchedulerConfig::default(),
            evaluator: EvaluatorConfig::default(),
            refiner: RefinerConfig::default(),
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
            metrics_api: None,
        }
    }
}

/// Evaluation scheduler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SchedulerConfig {
    /// Hours between automatic evaluations.
    #[serde(default = "default_evaluation_interval_hours")]
    pub evaluation_interval_hours: f64,

    /// Overall score below which improvement is considered needed.
    #[serde(default = "default_performance_threshold")]
    pub performance_threshold: f64,

    /// Whether triggered evaluations also inject the refinement check task.
    #[serde(default = "default_auto_trigger_refinement")]
    pub auto_trigger_refinement: bool,
}

const fn default_evaluation_interval_hours() -> f64 {
    24.0
}

const fn default_performance_threshold() -> f64 {
    0.8
}

const fn default_auto_trigger_refinement() -> bool {
    true
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            evaluation_interval_hours: default_evaluation_interval_hours(),
            performance_threshold: default_performance_threshold(),
            auto_trigger_refinement: default_auto_trigger_refinement(),
        }
    }
}

/// Performance evaluator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EvaluatorConfig {
    /// Overall score below which `improvement_needed` is set.
    #[serde(default = "default_performance_threshold")]
    pub performance_threshold: f64,

    /// Default evaluation window when a caller does not supply one.
    #[serde(default = "default_time_window_hours")]
    pub default_time_window_hours: f64,
}

const fn default_time_window_hours() -> f64 {
    24.0
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            performance_threshold: default_performance_threshold(),
            default_time_window_hours: default_time_window_hours(),
        }
    }
}

/// Prompt refiner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RefinerConfig {
    /// Overall score below which the clarification-seeking block is appended.
    #[serde(default = "default_clarification_threshold")]
    pub clarification_threshold: f64,
}

const fn default_clarification_threshold() -> f64 {
    0.9
}

impl Default for RefinerConfig {
    fn default() -> Self {
        Self {
            clarification_threshold: default_clarification_threshold(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to the `SQLite` database file.
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Maximum number of database connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> String {
    ".reforge/reforge.db".to_string()
}

const fn default_max_connections() -> u32 {
    10
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty.
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Optional directory for rotating file output.
    #[serde(default)]
    pub log_dir: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
        }
    }
}

/// Metrics API configuration for the HTTP metrics source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MetricsApiConfig {
    /// Base URL of the metrics endpoint.
    pub base_url: String,

    /// Optional bearer token.
    #[serde(default)]
    pub api_token: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Upper bound on total retry time in seconds.
    #[serde(default = "default_max_retry_secs")]
    pub max_retry_secs: u64,
}

const fn default_request_timeout_secs() -> u64 {
    10
}

const fn default_max_retry_secs() -> u64 {
    30
}
