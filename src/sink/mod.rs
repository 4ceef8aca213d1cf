//! Log sink adapters.
//!
//! # Data Flow
//! ```text
//! Logger facade
//!     → one worker task per sink (FIFO queue)
//!     → console.rs (colorized line on stdout)
//!     → file.rs (daily-rotated JSON Lines, retention pruning)
//!     → remote.rs (one JSON document per entry, HTTP POST)
//! ```
//!
//! # Design Decisions
//! - One async capability per sink: accept(entry) → Result
//! - Sinks are independent; a failing adapter is reported and dropped by
//!   its worker, never raised to the logging caller
//! - Constructors are fallible so bootstrap fails fast on an unusable sink
//!   (unwritable directory, malformed endpoint URL)

pub mod console;
pub mod file;
pub mod remote;

use async_trait::async_trait;
use thiserror::Error;

use crate::logging::{Level, LogEntry};

pub use console::ConsoleSink;
pub use file::FileSink;
pub use remote::RemoteSink;

/// Error raised by a sink while initializing or writing one entry.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid endpoint URL: {0}")]
    Endpoint(#[from] url::ParseError),
}

/// A destination that records log entries.
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Short name used when reporting sink failures.
    fn name(&self) -> &'static str;

    /// Least severe level this sink accepts.
    fn min_level(&self) -> Level;

    /// Record one entry.
    async fn accept(&self, entry: &LogEntry) -> Result<(), SinkError>;
}
