//! Request identification and forwarding-path construction.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) as early as possible
//! - Build the internal forwarding path from the inbound URI
//!
//! # Design Decisions
//! - The forwarding path is prefix + original path-and-query, verbatim;
//!   no rewriting beyond the fixed prefix

use axum::http::{HeaderValue, Request, Uri};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// UUID v4 request IDs for the x-request-id header.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeBridgeRequestId;

impl MakeRequestId for MakeBridgeRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Internal forwarding path: fixed proxy prefix + original path and query.
pub fn forward_path(prefix: &str, uri: &Uri) -> String {
    let original = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    format!("{prefix}{original}")
}
