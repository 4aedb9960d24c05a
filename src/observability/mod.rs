//! Observability subsystem.
//!
//! Structured logging only: handler events go through `tracing` directly,
//! unwrap-chain diagnostics go through the injected sink in
//! `bridge::diagnostics` (which forwards to `tracing` in production).

pub mod logging;
