//! End-to-end pipeline tests: facade → formatter → sink fan-out.

mod common;

use logfan::config::{FileSinkConfig, LoggingConfig, RemoteSinkConfig};
use logfan::{Level, LogEntry, Logger, Metadata, RequestContext};
use serde_json::Value;

fn pipeline_config(dir: &std::path::Path, endpoint: &str) -> LoggingConfig {
    let mut config = LoggingConfig {
        context: "user-api".into(),
        ..LoggingConfig::default()
    };
    config.console.color = false;
    config.file = FileSinkConfig {
        min_level: Level::Debug,
        directory: dir.to_path_buf(),
        prefix: "app".into(),
        retention_days: 30,
    };
    config.remote = RemoteSinkConfig {
        enabled: true,
        min_level: Level::Warn,
        endpoint: endpoint.into(),
        timeout_secs: 5,
    };
    config
}

fn read_file_entries(dir: &std::path::Path) -> Vec<LogEntry> {
    let today = chrono::Utc::now().date_naive();
    let path = dir.join(format!("app-{today}.log"));
    std::fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn every_level_reaches_file_and_only_warnings_reach_remote() {
    let dir = tempfile::tempdir().unwrap();
    let (endpoint, documents, _server) = common::start_collector().await;
    let logger = Logger::from_config(&pipeline_config(dir.path(), &endpoint)).unwrap();

    logger.debug("d", None);
    logger.verbose("v", None);
    logger.log("i", None);
    logger.warn("w", None);
    logger.error("e", None, None);
    logger.flush().await;

    let file_entries = read_file_entries(dir.path());
    let messages: Vec<&str> = file_entries.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, ["d", "v", "i", "w", "e"]);

    let documents = documents.lock().unwrap().clone();
    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0]["level"], "warn");
    assert_eq!(documents[1]["level"], "error");
}

#[tokio::test]
async fn entries_share_one_shape_across_sinks() {
    let dir = tempfile::tempdir().unwrap();
    let (endpoint, documents, _server) = common::start_collector().await;
    let logger = Logger::from_config(&pipeline_config(dir.path(), &endpoint)).unwrap();

    logger.warn("disk nearly full", Metadata::new().with("freeMb", 12));
    logger.flush().await;

    let file_entries = read_file_entries(dir.path());
    let file_entry = serde_json::to_value(&file_entries[0]).unwrap();
    let remote_doc = documents.lock().unwrap()[0].clone();

    let file_keys: Vec<&String> = file_entry.as_object().unwrap().keys().collect();
    let remote_keys: Vec<&String> = remote_doc.as_object().unwrap().keys().collect();
    assert_eq!(file_keys, remote_keys);
    assert_eq!(file_entry["message"], remote_doc["message"]);
    assert_eq!(file_entry["timestamp"], remote_doc["timestamp"]);
    assert_eq!(remote_doc["context"], "user-api");
    assert_eq!(remote_doc["metadata"]["freeMb"], 12);
}

#[tokio::test]
async fn request_context_flows_into_durable_entries() {
    let dir = tempfile::tempdir().unwrap();
    let (endpoint, _documents, _server) = common::start_collector().await;
    let logger = Logger::from_config(&pipeline_config(dir.path(), &endpoint)).unwrap();

    let ctx = RequestContext {
        request_id: "abc".into(),
        ip: "1.2.3.4".into(),
        method: "GET".into(),
        url: "/x".into(),
        user_agent: None,
    };
    logfan::context::scope(ctx, async {
        logger.log("hello", Metadata::new().with("userId", 7));
    })
    .await;
    logger.flush().await;

    let entries = read_file_entries(dir.path());
    let entry = &entries[0];
    assert_eq!(entry.level, Level::Info);
    assert_eq!(entry.metadata.get("requestId"), Some(&Value::from("abc")));
    assert_eq!(entry.metadata.get("ip"), Some(&Value::from("1.2.3.4")));
    assert_eq!(entry.metadata.get("method"), Some(&Value::from("GET")));
    assert_eq!(entry.metadata.get("url"), Some(&Value::from("/x")));
    assert_eq!(entry.metadata.get("userId"), Some(&Value::from(7)));
}
