//! Response classification
//!
//! The wire protocol signals some failures through the HTTP status line and
//! others through a structured error list embedded in an otherwise successful
//! body. Both surface here as one tagged outcome, so no caller ever has to
//! infer failure from the status code alone.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Literal markers for an embedded error array in the response payload.
/// Both whitespace variants occur on the wire.
const ERROR_MARKERS: [&str; 2] = ["\"errors\":[{", "\"errors\": [{"];

/// Outcome of one executed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseOutcome {
    /// Successful status with no embedded errors; carries the body text
    Success { body: String },
    /// The server answered with an HTTP status >= 300
    TransportError { status: u16, reason: String },
    /// Successful status, but the body embeds an error payload
    DomainError { body: String },
}

impl ResponseOutcome {
    /// Classify a response from its status line and body text
    ///
    /// A status >= 300 is a transport error no matter what the body says;
    /// the body of a failed response is never read as a success payload.
    pub fn classify(status: u16, reason: &str, body: &str) -> Self {
        if status >= 300 {
            return ResponseOutcome::TransportError {
                status,
                reason: reason.to_string(),
            };
        }
        if has_embedded_errors(body) {
            return ResponseOutcome::DomainError {
                body: body.to_string(),
            };
        }
        ResponseOutcome::Success {
            body: body.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResponseOutcome::Success { .. })
    }

    /// Convert into the driver error taxonomy, yielding the success body
    pub fn into_result(self) -> Result<String> {
        match self {
            ResponseOutcome::Success { body } => Ok(body),
            ResponseOutcome::TransportError { status, reason } => {
                Err(Error::Transport { status, reason })
            }
            ResponseOutcome::DomainError { body } => Err(Error::Domain { body }),
        }
    }
}

/// Scan the body text for the literal markers of an embedded error array.
///
/// This is a substring check, not a structural parse; the response body is
/// opaque to this crate.
fn has_embedded_errors(body: &str) -> bool {
    ERROR_MARKERS.iter().any(|marker| body.contains(marker))
}
