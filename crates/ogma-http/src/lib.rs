//! Ogma HTTP driver: the transactional network layer of the Ogma
//! object-graph mapper
//!
//! The driver opens, tracks, and closes logical transactions against a
//! remote graph database reachable over a stateless HTTP request/response
//! protocol, and classifies every response into success, domain-level error,
//! or transport-level error.
//!
//! # Main Components
//!
//! - **Driver**: composes configuration, the shared transport client, and
//!   the transaction registry; hands out request handlers and transactions
//! - **Transaction Handle**: one server-side transaction, committed or
//!   rolled back exactly once
//! - **Response Classification**: a three-way outcome, since a 2xx response
//!   can still carry an embedded error payload in its body
//! - **Error Handling**: one error taxonomy using `thiserror` and `anyhow`
//!
//! Object marshalling, result materialization, and configuration loading
//! live elsewhere in Ogma; request and response bodies are opaque text here.
//!
//! # Example
//!
//! ```no_run
//! use ogma_http::{
//!     Credentials, Driver, DriverConfig, ExecutionContext, HttpDriver, Request,
//!     Transaction, TransactionRegistry,
//! };
//!
//! fn example() -> ogma_http::Result<()> {
//!     let config = DriverConfig::new("http://localhost:7474")
//!         .with_credentials(Credentials::basic("neo", "secret"));
//!     let driver = HttpDriver::new(config, TransactionRegistry::new())?;
//!
//!     let context = ExecutionContext::new();
//!     let mut tx = driver.new_transaction(context)?;
//!     let outcome = driver
//!         .request_handler(context)?
//!         .execute(r#"{"statements":[]}"#)?;
//!     let _reply = outcome.into_result()?;
//!     tx.commit()?;
//!
//!     driver.close();
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod http;
pub mod transaction;

pub use config::DriverConfig;
pub use driver::{Driver, HttpDriver};
pub use error::{Error, Result};
pub use http::{Credentials, HttpRequest, Request, ResponseOutcome};
pub use transaction::{
    ExecutionContext, HttpTransaction, Transaction, TransactionRegistry, TransactionStatus,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
