//! Request tracking middleware.
//!
//! # Responsibilities
//! - Build the RequestContext for each inbound request (header id or
//!   generated) and bind it for the handler's lifetime
//! - Emit one summary entry per request at completion
//! - Supply request ids to tower-http's set/propagate layers

use std::net::SocketAddr;
use std::time::Instant;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use tower_http::request_id::{MakeRequestId, RequestId};

use crate::context::{self, request_id, RequestContext};
use crate::logging::{Logger, Metadata};

/// tower-http request id maker backed by the crate's generator.
#[derive(Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = request_id::generate();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Capture request metadata, scope it task-locally around the inner
/// service, then emit the completion summary.
///
/// Every log call made while handling the request picks the context up
/// through the formatter; the summary entry itself is emitted inside the
/// scope so it carries the request id too.
pub async fn track_requests(
    State(logger): State<Logger>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let ctx = RequestContext::from_parts(
        request.headers(),
        request.method(),
        request.uri(),
        addr.ip(),
    );
    let started = Instant::now();

    context::scope(ctx, async move {
        let response = next.run(request).await;

        let summary = Metadata::new()
            .with("status", response.status().as_u16())
            .with("duration_ms", started.elapsed().as_millis() as u64);
        logger.log("request completed", summary);

        response
    })
    .await
}
