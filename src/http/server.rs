//! HTTP server setup and the bridge handler.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all bridge handler
//! - Wire up middleware (request ID, timeout, trace, concurrency limit)
//! - Dispatch the subrequest and feed the reply through the unwrap chain
//! - Emit exactly one client response per inbound request

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{request_id::SetRequestIdLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::bridge::{
    unwrap_reply, DiagnosticSink, HyperDispatcher, SubrequestDispatcher, SubrequestReply,
    TracingSink,
};
use crate::config::GatewayConfig;
use crate::http::request::{forward_path, MakeBridgeRequestId, X_REQUEST_ID};

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<dyn SubrequestDispatcher>,
    pub diagnostics: Arc<dyn DiagnosticSink>,
    pub path_prefix: Arc<str>,
}

/// HTTP server for the lambda bridge gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a server with the production dispatcher and diagnostic sink.
    pub fn new(config: GatewayConfig) -> Self {
        let dispatcher = Arc::new(HyperDispatcher::new(
            config.upstream.address.clone(),
            Duration::from_secs(config.upstream.timeout_secs),
        ));
        Self::with_collaborators(config, dispatcher, Arc::new(TracingSink))
    }

    /// Create a server with injected collaborators. Tests substitute a
    /// scripted dispatcher and a recording sink here.
    pub fn with_collaborators(
        config: GatewayConfig,
        dispatcher: Arc<dyn SubrequestDispatcher>,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        let state = AppState {
            dispatcher,
            diagnostics,
            path_prefix: config.upstream.path_prefix.as_str().into(),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(bridge_handler))
            .route("/", any(bridge_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(SetRequestIdLayer::x_request_id(MakeBridgeRequestId))
            .layer(TraceLayer::new_for_http())
            .layer(GlobalConcurrencyLimitLayer::new(
                config.listener.max_connections,
            ))
    }

    /// Run the server until the shutdown signal fires or Ctrl+C arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.address,
            path_prefix = %self.config.upstream.path_prefix,
            "lambda bridge listening"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                // A trigger that fired before this receiver subscribed is
                // only visible through borrow(), not changed().
                if !*shutdown.borrow() {
                    tokio::select! {
                        _ = shutdown.changed() => {}
                        _ = tokio::signal::ctrl_c() => {}
                    }
                }
                tracing::info!("shutdown signal received");
            })
            .await?;

        tracing::info!("lambda bridge stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Main bridge handler.
///
/// Forwards the inbound method and URI to the internal proxy path and
/// unwraps the backend envelope. Every branch returns a value, so the
/// response is emitted exactly once.
async fn bridge_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let method = request.method().clone();
    let target = forward_path(&state.path_prefix, request.uri());

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        target = %target,
        "dispatching subrequest"
    );

    let reply = match state.dispatcher.dispatch(method, &target).await {
        Ok(reply) => reply,
        Err(error) => {
            tracing::error!(
                request_id = %request_id,
                target = %target,
                error = %error,
                "subrequest dispatch failed"
            );
            // The call never produced an HTTP reply; present the failure to
            // the unwrap chain as a synthetic transport status.
            SubrequestReply {
                status: error.transport_status(),
                body: Bytes::new(),
            }
        }
    };

    let response = unwrap_reply(&reply, state.diagnostics.as_ref());

    tracing::debug!(
        request_id = %request_id,
        status = response.status,
        "client response ready"
    );

    response.into_response()
}
