//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Notification dispatch configuration.
    #[serde(default)]
    pub notifier: NotifierConfig,
    /// Scheduler configuration.
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    /// Attachment storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Notification dispatch configuration.
///
/// Replaces the ad-hoc settings row of earlier iterations: recipient
/// lists and schedule times are injected at startup and are immutable
/// for the life of the process.
#[derive(Debug, Clone, Deserialize)]
pub struct NotifierConfig {
    /// Phone numbers for the financial/admin recipient set, one per entry.
    #[serde(default)]
    pub financial_numbers: Vec<String>,
    /// Local time ("HH:MM") for the consultants' activities-of-today report.
    #[serde(default)]
    pub daily_activities_time: Option<String>,
    /// Local time ("HH:MM") for the consultants' overdue-activities report.
    #[serde(default)]
    pub daily_overdue_time: Option<String>,
    /// Local time ("HH:MM") for the admin titles-due-today report.
    #[serde(default)]
    pub daily_admin_due_time: Option<String>,
    /// IANA timezone the schedule times are expressed in.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Country code prefixed to phone numbers without one.
    #[serde(default = "default_country_code")]
    pub default_country_code: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            financial_numbers: Vec::new(),
            daily_activities_time: None,
            daily_overdue_time: None,
            daily_admin_due_time: None,
            timezone: default_timezone(),
            default_country_code: default_country_code(),
        }
    }
}

fn default_timezone() -> String {
    "America/Sao_Paulo".to_string()
}

fn default_country_code() -> String {
    "55".to_string()
}

/// Scheduler configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Seconds between dispatch checks in loop mode.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

fn default_interval_secs() -> u64 {
    30
}

/// Attachment storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Storage backend: "fs" or "s3".
    #[serde(default = "default_storage_backend")]
    pub backend: String,
    /// Root directory (fs) or key prefix (s3).
    #[serde(default = "default_storage_root")]
    pub root: String,
    /// Bucket name (s3 only).
    #[serde(default)]
    pub bucket: String,
    /// Region (s3 only).
    #[serde(default)]
    pub region: String,
    /// Custom endpoint (s3-compatible providers).
    #[serde(default)]
    pub endpoint: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            root: default_storage_root(),
            bucket: String::new(),
            region: String::new(),
            endpoint: String::new(),
        }
    }
}

fn default_storage_backend() -> String {
    "fs".to_string()
}

fn default_storage_root() -> String {
    "./media".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("PRAXIS").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
