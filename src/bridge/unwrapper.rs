//! The envelope unwrap decision chain.
//!
//! # Responsibilities
//! - Classify a completed subrequest reply: transport failure, empty body,
//!   malformed payload, or valid envelope
//! - Produce exactly one client response per reply
//! - Emit a diagnostic on every non-success branch, never on success
//!
//! # Design Decisions
//! - First matching condition wins; every branch is terminal
//! - All failures surface as HTTP 502 with a fixed, client-safe message;
//!   detail (parse error, raw body) goes to the diagnostic sink only
//! - No retries, no backoff: the chain runs once per reply

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::bridge::diagnostics::{DiagnosticSink, Severity};
use crate::bridge::dispatcher::SubrequestReply;
use crate::bridge::envelope::Envelope;

/// Terminal client-facing response. Constructed by exactly one exit path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientResponse {
    pub status: u16,
    pub body: String,
}

impl IntoResponse for ClientResponse {
    fn into_response(self) -> Response {
        // An envelope can declare a u16 that is not a legal HTTP status
        // (e.g. 99); collapse those to 502 at the emit boundary.
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::BAD_GATEWAY);
        (status, self.body).into_response()
    }
}

/// Failure branches of the unwrap chain. `Display` is the client body.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The subrequest itself failed at the proxy/transport level.
    #[error("Lambda Bridge Error: {0}")]
    UpstreamTransport(u16),

    /// Backend claimed success but produced no payload.
    #[error("Lambda returned empty response. Check Python logs for logic errors.")]
    EmptyBackendBody,

    /// Body present but the envelope cannot be read from it.
    #[error("Invalid JSON from Lambda")]
    MalformedPayload(String),
}

/// Run the decision chain over a completed reply.
///
/// Total function: every input maps to exactly one `ClientResponse`, so the
/// caller emits exactly once by construction.
pub fn unwrap_reply(reply: &SubrequestReply, diagnostics: &dyn DiagnosticSink) -> ClientResponse {
    match decode(reply) {
        Ok(envelope) => envelope.into_client_response(),
        Err(error) => {
            match &error {
                BridgeError::UpstreamTransport(status) => diagnostics.log(
                    Severity::Error,
                    &format!("Lambda bridge transport failure: subrequest returned {status}"),
                ),
                BridgeError::EmptyBackendBody => diagnostics.log(
                    Severity::Critical,
                    "Lambda returned 200 but body is EMPTY/UNDEFINED",
                ),
                BridgeError::MalformedPayload(detail) => diagnostics.log(
                    Severity::Error,
                    &format!(
                        "JSON Parse Error: {detail} | Body: {}",
                        String::from_utf8_lossy(&reply.body)
                    ),
                ),
            }
            ClientResponse {
                status: 502,
                body: error.to_string(),
            }
        }
    }
}

fn decode(reply: &SubrequestReply) -> Result<Envelope, BridgeError> {
    if reply.status != 200 {
        return Err(BridgeError::UpstreamTransport(reply.status));
    }
    if reply.body.is_empty() {
        return Err(BridgeError::EmptyBackendBody);
    }
    let value: serde_json::Value = serde_json::from_slice(&reply.body)
        .map_err(|error| BridgeError::MalformedPayload(error.to_string()))?;
    match value {
        // Field access on null faults in the original gateway, so a JSON
        // null stays on the malformed branch.
        serde_json::Value::Null => {
            Err(BridgeError::MalformedPayload("envelope is null".to_string()))
        }
        serde_json::Value::Object(_) => serde_json::from_value(value)
            .map_err(|error| BridgeError::MalformedPayload(error.to_string())),
        // Any other JSON value parses but carries neither field; both
        // defaults apply.
        _ => Ok(Envelope {
            status_code: None,
            body: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use std::sync::Mutex;

    /// Records every diagnostic for assertion.
    #[derive(Default)]
    struct RecordingSink {
        entries: Mutex<Vec<(Severity, String)>>,
    }

    impl RecordingSink {
        fn entries(&self) -> Vec<(Severity, String)> {
            self.entries.lock().unwrap().clone()
        }
    }

    impl DiagnosticSink for RecordingSink {
        fn log(&self, severity: Severity, message: &str) {
            self.entries.lock().unwrap().push((severity, message.to_string()));
        }
    }

    fn reply(status: u16, body: &str) -> SubrequestReply {
        SubrequestReply {
            status,
            body: Bytes::copy_from_slice(body.as_bytes()),
        }
    }

    #[test]
    fn test_non_200_transport_status_becomes_502() {
        for status in [404, 500, 502, 503, 504] {
            let sink = RecordingSink::default();
            let response = unwrap_reply(&reply(status, r#"{"statusCode":200}"#), &sink);
            assert_eq!(response.status, 502);
            assert_eq!(response.body, format!("Lambda Bridge Error: {status}"));
            // No JSON parsing is attempted on this branch.
            assert_eq!(sink.entries().len(), 1);
        }
    }

    #[test]
    fn test_empty_body_logs_one_critical() {
        let sink = RecordingSink::default();
        let response = unwrap_reply(&reply(200, ""), &sink);
        assert_eq!(response.status, 502);
        assert_eq!(
            response.body,
            "Lambda returned empty response. Check Python logs for logic errors."
        );
        let entries = sink.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, Severity::Critical);
    }

    #[test]
    fn test_non_json_body_logs_one_error_with_raw_body() {
        let sink = RecordingSink::default();
        let response = unwrap_reply(&reply(200, "not json"), &sink);
        assert_eq!(response.status, 502);
        assert_eq!(response.body, "Invalid JSON from Lambda");
        let entries = sink.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, Severity::Error);
        assert!(entries[0].1.contains("not json"));
    }

    #[test]
    fn test_valid_envelope_passes_through_without_diagnostics() {
        let sink = RecordingSink::default();
        let response = unwrap_reply(&reply(200, r#"{"statusCode":201,"body":"created"}"#), &sink);
        assert_eq!(response.status, 201);
        assert_eq!(response.body, "created");
        assert!(sink.entries().is_empty());
    }

    #[test]
    fn test_empty_envelope_applies_defaults() {
        let sink = RecordingSink::default();
        let response = unwrap_reply(&reply(200, "{}"), &sink);
        assert_eq!(response.status, 200);
        assert_eq!(response.body, "");
        assert!(sink.entries().is_empty());
    }

    #[test]
    fn test_non_object_json_bodies_apply_both_defaults() {
        // A string, array, number, or boolean parses as JSON but carries
        // neither envelope field.
        for body in [r#""ok""#, "[1,2]", "42", "true"] {
            let sink = RecordingSink::default();
            let response = unwrap_reply(&reply(200, body), &sink);
            assert_eq!(response.status, 200, "body {body}");
            assert_eq!(response.body, "");
            assert!(sink.entries().is_empty(), "body {body}");
        }
    }

    #[test]
    fn test_null_body_maps_to_502() {
        let sink = RecordingSink::default();
        let response = unwrap_reply(&reply(200, "null"), &sink);
        assert_eq!(response.status, 502);
        assert_eq!(response.body, "Invalid JSON from Lambda");
        assert_eq!(sink.entries().len(), 1);
        assert_eq!(sink.entries()[0].0, Severity::Error);
    }

    #[test]
    fn test_falsy_envelope_fields_apply_defaults() {
        let sink = RecordingSink::default();
        let response = unwrap_reply(&reply(200, r#"{"statusCode":0,"body":""}"#), &sink);
        assert_eq!(response.status, 200);
        assert_eq!(response.body, "");
    }

    #[test]
    fn test_identical_replies_yield_identical_responses() {
        let sink = RecordingSink::default();
        let input = reply(200, r#"{"statusCode":418,"body":"teapot"}"#);
        let first = unwrap_reply(&input, &sink);
        let second = unwrap_reply(&input, &sink);
        assert_eq!(first, second);
    }
}
