//! Backend response envelope.
//!
//! The backend answers the subrequest with a JSON object declaring the
//! status and body it wants the client to see:
//!
//! ```json
//! { "statusCode": 201, "body": "created" }
//! ```
//!
//! Both fields are optional. Extraction applies truthy defaulting, matching
//! the original bridge: a missing, zero, or empty value falls back to
//! `200` / `""`. A backend that genuinely means `statusCode: 0` or an
//! explicit empty body gets the default instead; that behavior is kept as-is
//! pending a product decision.

use serde::Deserialize;

use crate::bridge::unwrapper::ClientResponse;

/// Backend-declared client response, parsed from the subrequest body.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(rename = "statusCode")]
    pub status_code: Option<u16>,
    pub body: Option<String>,
}

impl Envelope {
    /// Extract the client response, defaulting falsy fields to `200` / `""`.
    pub fn into_client_response(self) -> ClientResponse {
        let status = self.status_code.filter(|&code| code != 0).unwrap_or(200);
        let body = self.body.filter(|body| !body.is_empty()).unwrap_or_default();
        ClientResponse { status, body }
    }
}
