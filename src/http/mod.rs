//! HTTP integration.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → SetRequestIdLayer (x-request-id header, UUID maker)
//!     → PropagateRequestIdLayer (id copied onto the response)
//!     → middleware.rs (context capture, scoped handler, summary entry)
//!     → application handlers
//! ```

pub mod middleware;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};

use crate::logging::Logger;

pub use middleware::{track_requests, MakeRequestUuid};

/// Attach the request id + request tracking middleware stack to a router.
pub fn with_request_tracking(router: Router, logger: Logger) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(axum::middleware::from_fn_with_state(logger, track_requests)),
    )
}
