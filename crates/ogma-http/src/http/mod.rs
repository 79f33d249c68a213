//! HTTP wire protocol plumbing
//!
//! This module provides the pieces the driver composes:
//! - Endpoint resolution from the configured server base
//! - Authorization stamping on outgoing requests
//! - Request execution and response classification

pub mod auth;
pub mod endpoint;
pub mod request;
pub mod response;

pub use auth::Credentials;
pub use request::{HttpRequest, Request};
pub use response::ResponseOutcome;
