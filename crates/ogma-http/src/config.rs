//! Driver configuration
//!
//! Holds the server base URL and optional credentials. The configuration is
//! immutable once the driver is constructed; loading it from files or the
//! environment is the host application's concern.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};
use crate::http::auth::Credentials;

/// Immutable driver configuration: server base URL plus optional credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DriverConfig {
    server: Option<String>,
    credentials: Option<Credentials>,
}

impl DriverConfig {
    /// Create a configuration pointing at the given server base URL
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: Some(server.into()),
            credentials: None,
        }
    }

    /// Attach credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// The configured server base URL
    ///
    /// An absent base is a configuration error, reported here so it is
    /// caught before any network I/O is attempted.
    pub fn server(&self) -> Result<&str> {
        self.server.as_deref().ok_or_else(|| Error::Configuration {
            message: "no server base URL configured".to_string(),
        })
    }

    /// The configured credentials, if any
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Validate that the configuration can be used for network I/O
    pub fn validate(&self) -> Result<()> {
        let server = self.server()?;
        Url::parse(server).map_err(|e| Error::Configuration {
            message: format!("invalid server base URL {server}: {e}"),
        })?;
        Ok(())
    }
}
