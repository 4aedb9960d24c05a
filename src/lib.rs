//! Lambda Bridge Gateway Library
//!
//! Translates backend envelope replies into client-facing HTTP responses:
//! the gateway forwards each inbound request to an internal proxy path, the
//! backend answers with a JSON envelope declaring the status and body it
//! wants the client to see, and the bridge validates the two-layer reply
//! and maps every failure mode to a deterministic 502.

pub mod bridge;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
