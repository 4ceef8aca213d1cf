//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{describe, validate_config, ValidationError};

/// Environment variable overriding the remote sink endpoint.
pub const REMOTE_URL_ENV: &str = "LOGFAN_REMOTE_URL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation failed: {}", describe(.0))]
    Validation(Vec<ValidationError>),
}

/// Load and validate configuration.
///
/// When `path` is `None` the built-in defaults are used. The
/// `LOGFAN_REMOTE_URL` environment variable, when set and non-empty,
/// overrides the remote endpoint from either source.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(path) => toml::from_str(&fs::read_to_string(path)?)?,
        None => AppConfig::default(),
    };

    apply_env_overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(url) = std::env::var(REMOTE_URL_ENV) {
        if !url.is_empty() {
            config.logging.remote.endpoint = url;
        }
    }
}
