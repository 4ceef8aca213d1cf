//! Structured logging subsystem.
//!
//! # Data Flow
//! ```text
//! application code / middleware
//!     → logger.rs (facade: debug/verbose/log/warn/error)
//!     → formatter.rs (merge call + request context + timestamp)
//!     → fan-out to sink workers (see crate::sink)
//! ```
//!
//! # Design Decisions
//! - Entries are immutable and share one JSON shape across all sinks
//! - Request context is read from task-local storage at compose time
//! - Failures are passed as typed values, never inferred from thrown data

pub mod entry;
pub mod formatter;
pub mod level;
pub mod logger;

pub use entry::{Failure, LogEntry, Metadata};
pub use level::Level;
pub use logger::{Logger, LoggerBuilder};
