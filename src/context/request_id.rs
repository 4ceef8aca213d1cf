//! Request id generation.

use uuid::Uuid;

/// Generate an id unique enough to correlate all log lines for one request.
///
/// UUID v4 from process-local randomness. Collisions are practically
/// impossible within a logging window; this is not a security token.
pub fn generate() -> String {
    Uuid::new_v4().to_string()
}
