//! Subrequest dispatch to the internal proxy path.
//!
//! # Responsibilities
//! - Issue one HTTP call per inbound request against the upstream authority
//! - Enforce the configured backend-call deadline
//! - Buffer the reply body so the unwrap chain sees a completed reply
//!
//! # Design Decisions
//! - Trait seam so tests can substitute a scripted dispatcher
//! - The deadline is an explicit constructor parameter, not ambient state
//! - The inbound request body is not forwarded; the contract is method + URI

use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::{Method, Request, Uri};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use std::time::Duration;
use thiserror::Error;

/// Reply bodies beyond this size abort the dispatch.
const MAX_REPLY_BYTES: usize = 2 * 1024 * 1024;

/// Completed result of an internal proxy call, read-only to the unwrap chain.
///
/// An absent upstream body and a zero-length one are equivalent here; both
/// arrive as empty `Bytes`.
#[derive(Debug, Clone)]
pub struct SubrequestReply {
    pub status: u16,
    pub body: Bytes,
}

/// Failures below the HTTP layer of the subrequest.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("subrequest timed out after {0:?}")]
    Timeout(Duration),

    #[error("subrequest transport failure: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),

    #[error("invalid subrequest target: {0}")]
    Target(#[from] axum::http::uri::InvalidUri),

    #[error("failed to build subrequest: {0}")]
    Build(#[from] axum::http::Error),

    #[error("failed to read subrequest body: {0}")]
    Body(#[from] axum::Error),
}

impl DispatchError {
    /// Transport status presented to the unwrap chain when the call itself
    /// never produced an HTTP reply.
    pub fn transport_status(&self) -> u16 {
        match self {
            DispatchError::Timeout(_) => 504,
            _ => 502,
        }
    }
}

/// Performs the internal HTTP call and yields a completed reply.
#[async_trait]
pub trait SubrequestDispatcher: Send + Sync {
    async fn dispatch(
        &self,
        method: Method,
        path_and_query: &str,
    ) -> Result<SubrequestReply, DispatchError>;
}

/// Production dispatcher backed by the hyper-util legacy client.
pub struct HyperDispatcher {
    client: Client<HttpConnector, Body>,
    authority: String,
    timeout: Duration,
}

impl HyperDispatcher {
    /// `authority` is the host:port of the internal proxy; `timeout` is the
    /// total deadline for the subrequest including body read.
    pub fn new(authority: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self {
            client,
            authority: authority.into(),
            timeout,
        }
    }
}

#[async_trait]
impl SubrequestDispatcher for HyperDispatcher {
    async fn dispatch(
        &self,
        method: Method,
        path_and_query: &str,
    ) -> Result<SubrequestReply, DispatchError> {
        let uri: Uri = format!("http://{}{}", self.authority, path_and_query).parse()?;
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())?;

        let reply = async {
            let response = self.client.request(request).await?;
            let status = response.status().as_u16();
            let body = axum::body::to_bytes(Body::new(response.into_body()), MAX_REPLY_BYTES)
                .await
                .map_err(DispatchError::Body)?;
            Ok::<_, DispatchError>(SubrequestReply { status, body })
        };

        tokio::time::timeout(self.timeout, reply)
            .await
            .map_err(|_| DispatchError::Timeout(self.timeout))?
    }
}
