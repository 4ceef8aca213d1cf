//! Multi-sink structured logging for request-handling services.
//!
//! One logger facade fans structured entries out to a colorized console, a
//! daily-rotated file journal, and a remote indexed store, attaching the
//! metadata of the request being handled (request id, IP, method, URL)
//! captured by HTTP middleware.

pub mod config;
pub mod context;
pub mod http;
pub mod logging;
pub mod sink;

pub use config::{AppConfig, LoggingConfig};
pub use context::RequestContext;
pub use logging::{Failure, Level, LogEntry, Logger, LoggerBuilder, Metadata};
pub use sink::{LogSink, SinkError};
