//! Per-request context storage.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → middleware builds RequestContext (header id or generated)
//!     → scope() binds it task-locally for the handler future
//!     → every log call reads current() while composing its entry
//!     → scope ends with the request; nothing to clean up
//! ```
//!
//! # Design Decisions
//! - Context is task-local, never a shared mutable slot: two requests
//!   handled concurrently each observe only their own context
//! - current() returns None outside a request scope (startup, background
//!   tasks); entries then simply carry no request fields

pub mod request_id;

use axum::http::{header, HeaderMap, Method, Uri};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::net::IpAddr;

/// Header carrying an upstream-assigned request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Metadata of the inbound request currently being handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    /// Propagated from the `x-request-id` header, or generated.
    pub request_id: String,

    /// Peer address of the client.
    pub ip: String,

    /// HTTP verb.
    pub method: String,

    /// Request path and query.
    pub url: String,

    /// Client user agent, when sent.
    pub user_agent: Option<String>,
}

impl RequestContext {
    /// Build a context from the parts of an inbound request.
    ///
    /// Takes the `x-request-id` header when present, otherwise generates a
    /// fresh id so every request is correlatable.
    pub fn from_parts(headers: &HeaderMap, method: &Method, uri: &Uri, ip: IpAddr) -> Self {
        let request_id = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .unwrap_or_else(request_id::generate);

        let user_agent = headers
            .get(header::USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        Self {
            request_id,
            ip: ip.to_string(),
            method: method.to_string(),
            url: uri.to_string(),
            user_agent,
        }
    }
}

tokio::task_local! {
    static REQUEST_CONTEXT: RequestContext;
}

/// Run a future with `context` bound as the ambient request context.
///
/// The binding is scoped to this task and the future's lifetime; concurrent
/// scopes on other tasks are independent.
pub async fn scope<F>(context: RequestContext, future: F) -> F::Output
where
    F: Future,
{
    REQUEST_CONTEXT.scope(context, future).await
}

/// The context of the request currently being handled, if any.
pub fn current() -> Option<RequestContext> {
    REQUEST_CONTEXT.try_with(Clone::clone).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(id: &str) -> RequestContext {
        RequestContext {
            request_id: id.into(),
            ip: "127.0.0.1".into(),
            method: "GET".into(),
            url: "/".into(),
            user_agent: None,
        }
    }

    #[tokio::test]
    async fn current_is_none_outside_a_scope() {
        assert_eq!(current(), None);
    }

    #[tokio::test]
    async fn scope_binds_and_unbinds() {
        let seen = scope(context("req-1"), async { current() }).await;
        assert_eq!(seen.unwrap().request_id, "req-1");
        assert_eq!(current(), None);
    }

    #[tokio::test]
    async fn concurrent_scopes_do_not_leak_into_each_other() {
        let a = tokio::spawn(scope(context("a"), async {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            current().unwrap().request_id
        }));
        let b = tokio::spawn(scope(context("b"), async {
            current().unwrap().request_id
        }));

        assert_eq!(a.await.unwrap(), "a");
        assert_eq!(b.await.unwrap(), "b");
    }

    #[test]
    fn from_parts_prefers_header_id() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, "upstream-id".parse().unwrap());
        let ctx = RequestContext::from_parts(
            &headers,
            &Method::POST,
            &"/users?page=2".parse().unwrap(),
            "10.0.0.7".parse().unwrap(),
        );
        assert_eq!(ctx.request_id, "upstream-id");
        assert_eq!(ctx.method, "POST");
        assert_eq!(ctx.url, "/users?page=2");
        assert_eq!(ctx.ip, "10.0.0.7");
        assert_eq!(ctx.user_agent, None);
    }

    #[test]
    fn from_parts_generates_id_when_header_missing() {
        let ctx = RequestContext::from_parts(
            &HeaderMap::new(),
            &Method::GET,
            &"/".parse().unwrap(),
            "10.0.0.7".parse().unwrap(),
        );
        assert!(!ctx.request_id.is_empty());
    }
}
