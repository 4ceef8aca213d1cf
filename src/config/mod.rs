//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, env overrides)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → read by bootstrap and the logging pipeline
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; read-only for the process lifetime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError, REMOTE_URL_ENV};
pub use schema::{
    AppConfig, ConsoleSinkConfig, FileSinkConfig, ListenerConfig, LoggingConfig,
    RemoteSinkConfig, DEFAULT_REMOTE_ENDPOINT,
};
