//! Rotating file sink: one JSON Lines file per UTC day, with retention.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::config::FileSinkConfig;
use crate::logging::{Level, LogEntry};
use crate::sink::{LogSink, SinkError};

/// Appends entries to `<directory>/<prefix>-YYYY-MM-DD.log`, switching
/// files at UTC date boundaries and pruning files older than the retention
/// window after each switch.
pub struct FileSink {
    min_level: Level,
    directory: PathBuf,
    prefix: String,
    retention_days: u32,
    active: Mutex<ActiveFile>,
}

struct ActiveFile {
    date: NaiveDate,
    file: tokio::fs::File,
}

impl FileSink {
    /// Create the sink, preparing the log directory and today's file.
    ///
    /// Errors here are bootstrap failures: a process that cannot write its
    /// log journal must not start.
    pub fn new(config: &FileSinkConfig) -> Result<Self, SinkError> {
        std::fs::create_dir_all(&config.directory)?;
        let date = Utc::now().date_naive();
        let file = open_append(&config.directory, &config.prefix, date)?;
        Ok(Self {
            min_level: config.min_level,
            directory: config.directory.clone(),
            prefix: config.prefix.clone(),
            retention_days: config.retention_days,
            active: Mutex::new(ActiveFile { date, file }),
        })
    }
}

fn file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{prefix}-{date}.log")
}

fn open_append(directory: &Path, prefix: &str, date: NaiveDate) -> Result<tokio::fs::File, SinkError> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(directory.join(file_name(prefix, date)))?;
    Ok(tokio::fs::File::from_std(file))
}

/// Parse the date back out of a `<prefix>-YYYY-MM-DD.log` name.
fn parse_file_date(name: &str, prefix: &str) -> Option<NaiveDate> {
    let date = name
        .strip_prefix(prefix)?
        .strip_prefix('-')?
        .strip_suffix(".log")?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Delete files dated more than `retention_days` before `today`.
///
/// Only older-dated files are candidates, so pruning is safe to run while
/// the active file is being appended to.
async fn prune(
    directory: &Path,
    prefix: &str,
    retention_days: u32,
    today: NaiveDate,
) -> std::io::Result<()> {
    let mut entries = tokio::fs::read_dir(directory).await?;
    while let Some(dir_entry) = entries.next_entry().await? {
        let name = dir_entry.file_name();
        let Some(name) = name.to_str() else { continue };
        let Some(date) = parse_file_date(name, prefix) else {
            continue;
        };
        if (today - date).num_days() > i64::from(retention_days) {
            tokio::fs::remove_file(dir_entry.path()).await?;
        }
    }
    Ok(())
}

#[async_trait]
impl LogSink for FileSink {
    fn name(&self) -> &'static str {
        "file"
    }

    fn min_level(&self) -> Level {
        self.min_level
    }

    async fn accept(&self, entry: &LogEntry) -> Result<(), SinkError> {
        let today = Utc::now().date_naive();
        let mut active = self.active.lock().await;

        if active.date != today {
            active.file = open_append(&self.directory, &self.prefix, today)?;
            active.date = today;

            let directory = self.directory.clone();
            let prefix = self.prefix.clone();
            let retention_days = self.retention_days;
            tokio::spawn(async move {
                if let Err(error) = prune(&directory, &prefix, retention_days, today).await {
                    eprintln!("logfan: file sink retention prune failed: {error}");
                }
            });
        }

        let mut line = serde_json::to_string(entry)?;
        line.push('\n');
        active.file.write_all(line.as_bytes()).await?;
        Ok(())
    }
}
