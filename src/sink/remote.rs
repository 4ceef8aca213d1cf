//! Remote indexed-store sink.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::config::RemoteSinkConfig;
use crate::logging::{Level, LogEntry};
use crate::sink::{LogSink, SinkError};

/// Forwards entries at or above a minimum severity to a remote endpoint as
/// one JSON document per entry.
///
/// Transport failures surface as `Err` from [`accept`](LogSink::accept) and
/// are swallowed by the sink's worker; they never reach the logging caller.
pub struct RemoteSink {
    min_level: Level,
    endpoint: Url,
    client: reqwest::Client,
}

impl RemoteSink {
    pub fn new(config: &RemoteSinkConfig) -> Result<Self, SinkError> {
        let endpoint = Url::parse(&config.endpoint)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            min_level: config.min_level,
            endpoint,
            client,
        })
    }
}

#[async_trait]
impl LogSink for RemoteSink {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn min_level(&self) -> Level {
        self.min_level
    }

    async fn accept(&self, entry: &LogEntry) -> Result<(), SinkError> {
        self.client
            .post(self.endpoint.clone())
            .json(entry)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_endpoint() {
        let config = RemoteSinkConfig {
            enabled: true,
            min_level: Level::Warn,
            endpoint: "::nope::".into(),
            timeout_secs: 5,
        };
        assert!(matches!(
            RemoteSink::new(&config),
            Err(SinkError::Endpoint(_))
        ));
    }

    #[test]
    fn default_config_builds() {
        assert!(RemoteSink::new(&RemoteSinkConfig::default()).is_ok());
    }
}
