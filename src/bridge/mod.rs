//! Envelope unwrapping subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request (method + URI)
//!     → dispatcher.rs (subrequest to the internal proxy path)
//!     → unwrapper.rs (transport check, empty-body check, parse attempt)
//!     → envelope.rs (backend-declared status/body extraction)
//!     → ClientResponse (exactly one per inbound request)
//!
//! Every failure branch:
//!     → diagnostics.rs (severity + message, injected sink)
//! ```
//!
//! # Design Decisions
//! - The decision chain is a pure function over a completed reply; all I/O
//!   happens in the dispatcher before the chain runs
//! - The diagnostic sink is a passed-in capability, not a global, so the
//!   chain is testable without a tracing subscriber
//! - Dispatch failures below HTTP are folded into the transport branch with
//!   a synthetic status (502, or 504 on deadline)

pub mod diagnostics;
pub mod dispatcher;
pub mod envelope;
pub mod unwrapper;

pub use diagnostics::{DiagnosticSink, Severity, TracingSink};
pub use dispatcher::{DispatchError, HyperDispatcher, SubrequestDispatcher, SubrequestReply};
pub use envelope::Envelope;
pub use unwrapper::{unwrap_reply, BridgeError, ClientResponse};
