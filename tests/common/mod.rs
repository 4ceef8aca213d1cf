//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::{Json, State};
use axum::routing::post;
use axum::Router;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use logfan::{Level, LogEntry, LogSink, SinkError};

/// In-memory sink recording every accepted entry.
#[derive(Clone, Default)]
pub struct Capture {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Capture {
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }
}

pub struct CaptureSink {
    pub min_level: Level,
    pub capture: Capture,
}

#[async_trait]
impl LogSink for CaptureSink {
    fn name(&self) -> &'static str {
        "capture"
    }

    fn min_level(&self) -> Level {
        self.min_level
    }

    async fn accept(&self, entry: &LogEntry) -> Result<(), SinkError> {
        self.capture.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }
}

pub type Documents = Arc<Mutex<Vec<Value>>>;

/// Start a mock indexed store accepting POSTed JSON documents at `/logs`.
///
/// Returns the endpoint URL, the recorded documents, and the server task
/// (abort it to simulate the store dying).
pub async fn start_collector() -> (String, Documents, JoinHandle<()>) {
    let documents: Documents = Documents::default();

    async fn ingest(State(documents): State<Documents>, Json(doc): Json<Value>) {
        documents.lock().unwrap().push(doc);
    }

    let app = Router::new()
        .route("/logs", post(ingest))
        .with_state(documents.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (format!("http://{addr}/logs"), documents, server)
}

/// Serve a router on an ephemeral port with peer-address info available.
pub async fn serve_app(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await;
    });
    addr
}
