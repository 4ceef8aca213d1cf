//! Structured log entries and their attachments.
//!
//! A [`LogEntry`] is created once per log call and never mutated afterward;
//! sinks serialize it independently but always see the same shape.

use std::error::Error;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::logging::Level;

/// One immutable record of a single log event.
///
/// Serializes to a single JSON object. Every entry carries the same
/// `timestamp`/`level`/`message`/`context` shape regardless of which sink
/// records it, so console, file, and indexed-store output stay
/// cross-searchable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// RFC 3339 UTC timestamp with millisecond precision, taken at
    /// formatting time.
    pub timestamp: String,

    /// Entry severity.
    pub level: Level,

    /// Human-readable message.
    pub message: String,

    /// Label of the subsystem that emitted the entry.
    pub context: String,

    /// Merged key/value pairs: request-context fields first, caller
    /// metadata overlaid (caller wins on collision).
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,

    /// Captured failure text, present only on error-level entries tied to
    /// a failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Free-form string-keyed metadata attached to a log call.
///
/// Insertion order is preserved so rendered entries stay stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(Map<String, Value>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl From<Map<String, Value>> for Metadata {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A typed, captured failure attached to an error-level entry.
///
/// Callers pass this explicitly instead of the logger inspecting arbitrary
/// values at runtime. [`Failure::capture`] renders the full `source()`
/// chain so the entry records the root cause, not just the outermost
/// message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    text: String,
}

impl Failure {
    /// Capture an error and its source chain as `outer: cause: root`.
    pub fn capture<E>(error: &E) -> Self
    where
        E: Error + ?Sized,
    {
        let mut text = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            let _ = write!(text, ": {cause}");
            source = cause.source();
        }
        Self { text }
    }

    /// Wrap pre-rendered failure text.
    pub fn message(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl<E: Error> From<&E> for Failure {
    fn from(error: &E) -> Self {
        Failure::capture(error)
    }
}

impl From<Failure> for String {
    fn from(failure: Failure) -> Self {
        failure.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("query failed")]
    struct QueryError {
        #[source]
        source: std::io::Error,
    }

    #[test]
    fn metadata_preserves_insertion_order() {
        let meta = Metadata::new().with("b", 1).with("a", 2);
        let keys: Vec<_> = meta.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn failure_renders_source_chain() {
        let err = QueryError {
            source: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed"),
        };
        let failure = Failure::capture(&err);
        assert_eq!(failure.as_str(), "query failed: pipe closed");
    }

    #[test]
    fn entry_serializes_without_empty_fields() {
        let entry = LogEntry {
            timestamp: "2026-08-07T00:00:00.000Z".into(),
            level: Level::Info,
            message: "started".into(),
            context: "app".into(),
            metadata: Metadata::new(),
            error: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("metadata").is_none());
        assert!(json.get("error").is_none());
        assert_eq!(json["level"], "info");
    }
}
