//! Logger facade and sink fan-out.
//!
//! # Data Flow
//! ```text
//! debug/verbose/log/warn/error(message, ...)
//!     → formatter::compose (ambient request context merged in)
//!     → level filter per sink
//!     → unbounded FIFO queue per sink
//!     → one worker task per sink awaits the adapter write
//! ```
//!
//! # Design Decisions
//! - The calling path only enqueues; sink I/O never blocks request handling
//! - One worker per sink: entries keep facade order within a sink, and a
//!   slow or failing sink cannot delay the others
//! - A worker reports a failed write on stderr and drops the entry; sink
//!   errors never propagate to logging callers

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use crate::config::LoggingConfig;
use crate::context;
use crate::logging::formatter;
use crate::logging::{Failure, Level, LogEntry, Metadata};
use crate::sink::{ConsoleSink, FileSink, LogSink, RemoteSink, SinkError};

enum Command {
    Write(Arc<LogEntry>),
    Flush(oneshot::Sender<()>),
}

struct SinkHandle {
    min_level: Level,
    tx: mpsc::UnboundedSender<Command>,
}

/// Process-wide logging facade.
///
/// Cheap to clone; clones share the same sink workers. Must be created
/// inside a Tokio runtime (workers are spawned at build time).
#[derive(Clone)]
pub struct Logger {
    context: String,
    sinks: Arc<Vec<SinkHandle>>,
}

impl Logger {
    /// Build the standard console + file + remote pipeline.
    ///
    /// Fails fast on an unusable sink (unwritable log directory, malformed
    /// endpoint URL): the process must not run without its logging
    /// guarantee.
    pub fn from_config(config: &LoggingConfig) -> Result<Self, SinkError> {
        let mut builder = Logger::builder(config.context.clone())
            .sink(ConsoleSink::new(&config.console))
            .sink(FileSink::new(&config.file)?);
        if config.remote.enabled {
            builder = builder.sink(RemoteSink::new(&config.remote)?);
        }
        Ok(builder.build())
    }

    pub fn builder(context: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder {
            context: context.into(),
            sinks: Vec::new(),
        }
    }

    /// A handle with a different subsystem label sharing the same sinks.
    pub fn scoped(&self, context: impl Into<String>) -> Logger {
        Logger {
            context: context.into(),
            sinks: Arc::clone(&self.sinks),
        }
    }

    pub fn debug(&self, message: impl Into<String>, metadata: impl Into<Option<Metadata>>) {
        self.emit(Level::Debug, message.into(), metadata.into(), None);
    }

    pub fn verbose(&self, message: impl Into<String>, metadata: impl Into<Option<Metadata>>) {
        self.emit(Level::Verbose, message.into(), metadata.into(), None);
    }

    /// Info-level entry.
    pub fn log(&self, message: impl Into<String>, metadata: impl Into<Option<Metadata>>) {
        self.emit(Level::Info, message.into(), metadata.into(), None);
    }

    pub fn warn(&self, message: impl Into<String>, metadata: impl Into<Option<Metadata>>) {
        self.emit(Level::Warn, message.into(), metadata.into(), None);
    }

    /// Error-level entry with an optional captured failure.
    pub fn error(
        &self,
        message: impl Into<String>,
        failure: impl Into<Option<Failure>>,
        metadata: impl Into<Option<Metadata>>,
    ) {
        self.emit(Level::Error, message.into(), metadata.into(), failure.into());
    }

    fn emit(
        &self,
        level: Level,
        message: String,
        metadata: Option<Metadata>,
        failure: Option<Failure>,
    ) {
        let request = context::current();
        let entry = Arc::new(formatter::compose(
            &self.context,
            level,
            message,
            request.as_ref(),
            metadata,
            failure,
        ));
        for sink in self.sinks.iter() {
            if entry.level >= sink.min_level {
                // A send error means the worker is gone (shutdown); the
                // entry is dropped like any other sink failure.
                let _ = sink.tx.send(Command::Write(Arc::clone(&entry)));
            }
        }
    }

    /// Wait until every sink worker has processed its queued entries.
    pub async fn flush(&self) {
        let mut pending = Vec::with_capacity(self.sinks.len());
        for sink in self.sinks.iter() {
            let (tx, rx) = oneshot::channel();
            if sink.tx.send(Command::Flush(tx)).is_ok() {
                pending.push(rx);
            }
        }
        for rx in pending {
            let _ = rx.await;
        }
    }
}

/// Assembles a [`Logger`] from arbitrary sink adapters.
pub struct LoggerBuilder {
    context: String,
    sinks: Vec<Box<dyn LogSink>>,
}

impl LoggerBuilder {
    pub fn sink<S: LogSink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn build(self) -> Logger {
        let sinks = self.sinks.into_iter().map(spawn_worker).collect();
        Logger {
            context: self.context,
            sinks: Arc::new(sinks),
        }
    }
}

fn spawn_worker(sink: Box<dyn LogSink>) -> SinkHandle {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let min_level = sink.min_level();
    tokio::spawn(async move {
        while let Some(command) = rx.recv().await {
            match command {
                Command::Write(entry) => {
                    if let Err(error) = sink.accept(&entry).await {
                        eprintln!("logfan: {} sink dropped an entry: {error}", sink.name());
                    }
                }
                Command::Flush(done) => {
                    let _ = done.send(());
                }
            }
        }
    });
    SinkHandle { min_level, tx }
}
