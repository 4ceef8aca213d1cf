//! Console sink: human-readable lines on stdout.

use std::io::Write as _;

use async_trait::async_trait;
use colored::Colorize;

use crate::config::ConsoleSinkConfig;
use crate::logging::{Level, LogEntry};
use crate::sink::{LogSink, SinkError};

/// Writes one colorized line per entry to the process's stdout.
pub struct ConsoleSink {
    min_level: Level,
    color: bool,
}

impl ConsoleSink {
    pub fn new(config: &ConsoleSinkConfig) -> Self {
        Self {
            min_level: config.min_level,
            color: config.color,
        }
    }

    /// Render: timestamp, padded level tag, context, message, then the full
    /// entry as a structured suffix.
    fn render(&self, entry: &LogEntry) -> Result<String, SinkError> {
        let tag = format!("{:>7}", entry.level.as_str().to_uppercase());
        let tag = if self.color {
            colorize(entry.level, &tag)
        } else {
            tag
        };
        let json = serde_json::to_string(entry)?;
        Ok(format!(
            "{} {} [{}] {} {}",
            entry.timestamp, tag, entry.context, entry.message, json
        ))
    }
}

fn colorize(level: Level, tag: &str) -> String {
    match level {
        Level::Debug => tag.blue().to_string(),
        Level::Verbose => tag.cyan().to_string(),
        Level::Info => tag.green().to_string(),
        Level::Warn => tag.yellow().to_string(),
        Level::Error => tag.red().bold().to_string(),
    }
}

#[async_trait]
impl LogSink for ConsoleSink {
    fn name(&self) -> &'static str {
        "console"
    }

    fn min_level(&self) -> Level {
        self.min_level
    }

    async fn accept(&self, entry: &LogEntry) -> Result<(), SinkError> {
        let line = self.render(entry)?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{line}")?;
        Ok(())
    }
}
