//! Service configuration settings

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::models::StorageResult;

/// Main service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    pub metrics: MetricsSettings,
}

/// Server settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,
    /// HTTP server port
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// Number of worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Time allowed for a client to send the request head
    #[serde(default = "default_read_timeout")]
    pub read_timeout_sec: u64,
    /// Time allowed to finish a closing connection (not a response write deadline)
    #[serde(default = "default_write_timeout")]
    pub write_timeout_sec: u64,
    /// Keep-alive window for idle connections
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_sec: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    8080
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_read_timeout() -> u64 {
    5
}

fn default_write_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    120
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_sec)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_sec)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_sec)
    }
}

/// Storage collector settings
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Volume root to report usage for (default: the platform's system drive)
    pub root_path: Option<String>,
    /// Block-device registry walked on Linux
    #[serde(default = "default_block_device_path")]
    pub block_device_path: String,
    /// Device name prefixes skipped in addition to `loop` and `ram`
    #[serde(default)]
    pub extra_excluded_prefixes: Vec<String>,
}

fn default_block_device_path() -> String {
    "/sys/block".to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            root_path: None,
            block_device_path: default_block_device_path(),
            extra_excluded_prefixes: Vec::new(),
        }
    }
}

/// Metrics settings
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// Enable Prometheus metrics
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Metrics endpoint path
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

fn default_true() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

impl Settings {
    /// Load settings from file and environment
    pub fn load() -> StorageResult<Self> {
        Self::load_from("config")
    }

    /// Load settings from a specific config file path (without extension)
    pub fn load_from<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let config_path = path.as_ref();

        let builder = Config::builder()
            // Start with default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.http_port", 8080)?
            .set_default("server.workers", num_cpus::get() as i64)?
            .set_default("server.read_timeout_sec", 5)?
            .set_default("server.write_timeout_sec", 10)?
            .set_default("server.idle_timeout_sec", 120)?
            .set_default("storage.block_device_path", "/sys/block")?
            .set_default("metrics.enabled", true)?
            .set_default("metrics.path", "/metrics")?
            // Add config file if it exists
            .add_source(File::with_name(config_path.to_str().unwrap_or("config")).required(false))
            // Add environment variables with prefix PARACHUTE_
            .add_source(Environment::with_prefix("PARACHUTE").separator("__"));

        let settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            server: ServerSettings {
                host: default_host(),
                http_port: default_http_port(),
                workers: default_workers(),
                read_timeout_sec: default_read_timeout(),
                write_timeout_sec: default_write_timeout(),
                idle_timeout_sec: default_idle_timeout(),
            },
            storage: StorageSettings::default(),
            metrics: MetricsSettings {
                enabled: true,
                path: default_metrics_path(),
            },
        }
    }
}
