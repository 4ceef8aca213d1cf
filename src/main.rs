//! Demo API service wired to the logging pipeline.
//!
//! Boot order matters: configuration first, then the logger (failing fast
//! if any sink cannot start), then the listener. Everything after bind is
//! reported through the pipeline itself.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;

use logfan::config::load_config;
use logfan::http::with_request_tracking;
use logfan::logging::{Failure, Logger, Metadata};

#[derive(Parser)]
#[command(name = "logfan", about = "Demo API service with multi-sink structured logging")]
struct Args {
    /// Path to a TOML config file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("logfan: cannot load configuration: {error}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    // The process must not run without its logging guarantee.
    let logger = match Logger::from_config(&config.logging) {
        Ok(logger) => logger,
        Err(error) => {
            eprintln!("logfan: cannot initialize logging: {error}");
            return ExitCode::FAILURE;
        }
    };

    logger.log(
        "starting",
        Metadata::new().with("bind", config.listener.bind_address.as_str()),
    );

    let listener = match TcpListener::bind(&config.listener.bind_address).await {
        Ok(listener) => listener,
        Err(error) => {
            logger.error("cannot bind listener", Failure::capture(&error), None);
            logger.flush().await;
            return ExitCode::FAILURE;
        }
    };

    let app = with_request_tracking(demo_router(logger.clone()), logger.clone())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .into_make_service_with_connect_info::<SocketAddr>();

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    if let Err(error) = result {
        logger.error("server terminated", Failure::capture(&error), None);
        logger.flush().await;
        return ExitCode::FAILURE;
    }

    logger.log("shutdown complete", None);
    logger.flush().await;
    ExitCode::SUCCESS
}

/// Placeholder routes standing in for the application's real resources.
fn demo_router(logger: Logger) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/hello", get(hello))
        .with_state(logger)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn hello(State(logger): State<Logger>) -> &'static str {
    logger.debug("handling hello", None);
    logger.verbose(
        "greeting prepared",
        Metadata::new().with("greeting", "hi"),
    );
    "hi"
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
}
