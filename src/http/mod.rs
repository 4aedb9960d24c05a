//! HTTP gateway subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, forwarding path)
//!     → bridge (subrequest dispatch + envelope unwrap)
//!     → one terminal client response
//! ```

pub mod request;
pub mod server;

pub use request::{forward_path, MakeBridgeRequestId, X_REQUEST_ID};
pub use server::HttpServer;
