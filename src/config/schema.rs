//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so a minimal (or absent) config file works.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::logging::Level;

/// Fallback endpoint for the remote indexed store.
pub const DEFAULT_REMOTE_ENDPOINT: &str = "http://127.0.0.1:9200/logs";

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Logging pipeline configuration.
    pub logging: LoggingConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Logging pipeline configuration: one section per sink.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Label identifying this logging subsystem instance; attached to every
    /// entry as its `context` field.
    pub context: String,

    /// Console sink settings.
    pub console: ConsoleSinkConfig,

    /// Rotating file sink settings.
    pub file: FileSinkConfig,

    /// Remote indexed-store sink settings.
    pub remote: RemoteSinkConfig,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            context: "app".to_string(),
            console: ConsoleSinkConfig::default(),
            file: FileSinkConfig::default(),
            remote: RemoteSinkConfig::default(),
        }
    }
}

/// Console sink configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConsoleSinkConfig {
    /// Minimum level written to stdout.
    pub min_level: Level,

    /// Colorize the level tag.
    pub color: bool,
}

impl Default for ConsoleSinkConfig {
    fn default() -> Self {
        Self {
            min_level: Level::Debug,
            color: true,
        }
    }
}

/// Rotating file sink configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FileSinkConfig {
    /// Minimum level written to disk.
    pub min_level: Level,

    /// Directory holding the daily log files; created at startup.
    pub directory: PathBuf,

    /// Filename prefix: files are named `<prefix>-YYYY-MM-DD.log`.
    pub prefix: String,

    /// Files dated more than this many days before today are pruned.
    pub retention_days: u32,
}

impl Default for FileSinkConfig {
    fn default() -> Self {
        Self {
            min_level: Level::Debug,
            directory: PathBuf::from("logs"),
            prefix: "app".to_string(),
            retention_days: 30,
        }
    }
}

/// Remote indexed-store sink configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RemoteSinkConfig {
    /// Enable forwarding to the remote store.
    pub enabled: bool,

    /// Minimum level forwarded; bounds remote write volume.
    pub min_level: Level,

    /// Endpoint URL. Overridden by the `LOGFAN_REMOTE_URL` environment
    /// variable when set.
    pub endpoint: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RemoteSinkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_level: Level::Warn,
            endpoint: DEFAULT_REMOTE_ENDPOINT.to_string(),
            timeout_secs: 5,
        }
    }
}
