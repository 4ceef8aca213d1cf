//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (retention > 0) and parseable addresses/URLs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use url::Url;

use crate::config::schema::AppConfig;

/// A single semantic violation in a loaded config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidBindAddress(String),
    EmptyLoggingContext,
    EmptyFileDirectory,
    EmptyFilePrefix,
    ZeroRetention,
    InvalidRemoteEndpoint { url: String, reason: String },
    ZeroRemoteTimeout,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(addr) => {
                write!(f, "listener.bind_address {addr:?} is not a socket address")
            }
            ValidationError::EmptyLoggingContext => {
                write!(f, "logging.context must not be empty")
            }
            ValidationError::EmptyFileDirectory => {
                write!(f, "logging.file.directory must not be empty")
            }
            ValidationError::EmptyFilePrefix => {
                write!(f, "logging.file.prefix must not be empty")
            }
            ValidationError::ZeroRetention => {
                write!(f, "logging.file.retention_days must be at least 1")
            }
            ValidationError::InvalidRemoteEndpoint { url, reason } => {
                write!(f, "logging.remote.endpoint {url:?} is not a valid URL: {reason}")
            }
            ValidationError::ZeroRemoteTimeout => {
                write!(f, "logging.remote.timeout_secs must be at least 1")
            }
        }
    }
}

/// Join violations into one human-readable line.
pub fn describe(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Check a loaded config, collecting every violation.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let logging = &config.logging;
    if logging.context.is_empty() {
        errors.push(ValidationError::EmptyLoggingContext);
    }
    if logging.file.directory.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyFileDirectory);
    }
    if logging.file.prefix.is_empty() {
        errors.push(ValidationError::EmptyFilePrefix);
    }
    if logging.file.retention_days == 0 {
        errors.push(ValidationError::ZeroRetention);
    }
    if logging.remote.enabled {
        if let Err(err) = Url::parse(&logging.remote.endpoint) {
            errors.push(ValidationError::InvalidRemoteEndpoint {
                url: logging.remote.endpoint.clone(),
                reason: err.to_string(),
            });
        }
        if logging.remote.timeout_secs == 0 {
            errors.push(ValidationError::ZeroRemoteTimeout);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
