//! Log entry composition.
//!
//! Merges a raw log call with the ambient request context and a timestamp
//! into one [`LogEntry`]. Composition is a pure data merge and cannot fail;
//! a malformed call degrades to an entry with less detail, never to an
//! error.

use chrono::{SecondsFormat, Utc};

use crate::context::RequestContext;
use crate::logging::{Failure, Level, LogEntry, Metadata};

/// Build an entry from a log call.
///
/// Merge order is fixed: request-context pairs are seeded first, then the
/// caller's metadata is overlaid, so on a key collision the caller's value
/// wins.
pub fn compose(
    context: &str,
    level: Level,
    message: String,
    request: Option<&RequestContext>,
    metadata: Option<Metadata>,
    failure: Option<Failure>,
) -> LogEntry {
    let mut merged = Metadata::new();
    if let Some(request) = request {
        merged.insert("requestId", request.request_id.as_str());
        merged.insert("ip", request.ip.as_str());
        merged.insert("method", request.method.as_str());
        merged.insert("url", request.url.as_str());
        if let Some(user_agent) = &request.user_agent {
            merged.insert("userAgent", user_agent.as_str());
        }
    }
    if let Some(metadata) = metadata {
        for (key, value) in metadata.iter() {
            merged.insert(key.clone(), value.clone());
        }
    }

    LogEntry {
        timestamp: now_timestamp(),
        level,
        message,
        context: context.to_string(),
        metadata: merged,
        error: failure.map(String::from),
    }
}

/// Canonical timestamp format: RFC 3339 UTC with millisecond precision.
fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
