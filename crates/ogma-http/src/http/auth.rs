//! Authentication for the graph server
//!
//! Two credential schemes are supported:
//! - Basic (username/password)
//! - Bearer tokens
//!
//! Credentials are optional everywhere; a request without credentials goes
//! out without an `Authorization` header.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::blocking::RequestBuilder;
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};

/// Credentials for the remote graph server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Credentials {
    /// Username/password pair, sent with the basic scheme
    Basic { username: String, password: String },
    /// Opaque token, sent as a bearer credential
    Token { token: String },
}

impl Credentials {
    /// Create basic-auth credentials
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Create bearer-token credentials
    pub fn token(token: impl Into<String>) -> Self {
        Credentials::Token {
            token: token.into(),
        }
    }

    /// Pick up credentials from the environment: `OGMA_USERNAME` and
    /// `OGMA_PASSWORD` together, or `OGMA_TOKEN` alone
    pub fn from_env() -> Option<Self> {
        if let (Ok(username), Ok(password)) =
            (std::env::var("OGMA_USERNAME"), std::env::var("OGMA_PASSWORD"))
        {
            return Some(Credentials::basic(username, password));
        }
        std::env::var("OGMA_TOKEN").ok().map(Credentials::token)
    }

    /// The `Authorization` header value encoding these credentials
    pub fn header_value(&self) -> String {
        match self {
            Credentials::Basic { username, password } => {
                format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
            }
            Credentials::Token { token } => format!("Bearer {token}"),
        }
    }
}

/// Stamp an outgoing request with an `Authorization` header when credentials
/// are configured; otherwise return the request unchanged
pub(crate) fn authorize(
    request: RequestBuilder,
    credentials: Option<&Credentials>,
) -> RequestBuilder {
    match credentials {
        Some(credentials) => request.header(AUTHORIZATION, credentials.header_value()),
        None => request,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::blocking::Client;

    #[test]
    fn test_basic_header_value() {
        let credentials = Credentials::basic("neo", "secret");
        // base64("neo:secret")
        assert_eq!(credentials.header_value(), "Basic bmVvOnNlY3JldA==");
    }

    #[test]
    fn test_token_header_value() {
        let credentials = Credentials::token("abc123");
        assert_eq!(credentials.header_value(), "Bearer abc123");
    }

    #[test]
    fn test_authorize_attaches_header() {
        let credentials = Credentials::basic("neo", "secret");
        let request = Client::new().post("http://localhost:7474/db/data/transaction");
        let request = authorize(request, Some(&credentials)).build().unwrap();
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Basic bmVvOnNlY3JldA=="
        );
    }

    #[test]
    fn test_authorize_without_credentials_makes_no_change() {
        let request = Client::new().post("http://localhost:7474/db/data/transaction");
        let request = authorize(request, None).build().unwrap();
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_from_env_prefers_username_password() {
        // Save original env var values for restoration
        let original_user = std::env::var("OGMA_USERNAME").ok();
        let original_pass = std::env::var("OGMA_PASSWORD").ok();

        std::env::set_var("OGMA_USERNAME", "neo");
        std::env::set_var("OGMA_PASSWORD", "secret");

        let credentials = Credentials::from_env().unwrap();
        assert_eq!(credentials, Credentials::basic("neo", "secret"));

        // Restore original environment state
        match original_user {
            Some(value) => std::env::set_var("OGMA_USERNAME", value),
            None => std::env::remove_var("OGMA_USERNAME"),
        }
        match original_pass {
            Some(value) => std::env::set_var("OGMA_PASSWORD", value),
            None => std::env::remove_var("OGMA_PASSWORD"),
        }
    }
}
