//! Diagnostic logging capability.
//!
//! The unwrap chain reports its failure branches through this trait instead
//! of calling the logging macros directly, so tests can observe exactly
//! which diagnostics fired.

/// Severity of a diagnostic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Backend logic defect, needs operator attention.
    Critical,
    /// Failure handled at this layer.
    Error,
}

/// Sink for operational diagnostics. Fire-and-forget.
pub trait DiagnosticSink: Send + Sync {
    fn log(&self, severity: Severity, message: &str);
}

/// Production sink: forwards everything to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn log(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Critical => tracing::error!(severity = "critical", "{}", message),
            Severity::Error => tracing::error!(severity = "error", "{}", message),
        }
    }
}
