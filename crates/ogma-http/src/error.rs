//! Error types for the Ogma HTTP driver
//!
//! One error enum covers the driver's failure channels: configuration
//! problems detected before any network I/O, HTTP status failures, embedded
//! error payloads inside otherwise-successful responses, transport-level
//! execution failures, and driver misuse. The driver never retries; every
//! failure is surfaced to the immediate caller.

use thiserror::Error;

/// Main error type for driver operations
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid server configuration, detected before any network call
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The server answered with an HTTP status >= 300
    #[error("Request failed with status {status}: {reason}")]
    Transport { status: u16, reason: String },

    /// The server answered with a successful HTTP status but the response
    /// body carries an embedded error payload
    #[error("Response contains an embedded error payload")]
    Domain { body: String },

    /// The request could not be executed at all: connection failure,
    /// interrupted read, malformed response
    #[error("Failed to execute request: {message}")]
    Execution {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Driver misuse: a handle operated on after its terminal state, a
    /// nested begin, or a driver used after close. Never a network failure.
    #[error("Invalid driver usage: {message}")]
    Usage { message: String },
}

/// Convenience type alias for Results using the driver Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn execution(message: impl Into<String>) -> Self {
        Error::Execution {
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn usage(message: impl Into<String>) -> Self {
        Error::Usage {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Execution {
            message: err.to_string(),
            source: Some(anyhow::Error::new(err)),
        }
    }
}
