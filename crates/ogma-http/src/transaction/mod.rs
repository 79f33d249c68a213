//! Transaction handles
//!
//! A handle represents one open server-side transaction: the URL the server
//! assigned at begin time and the handle's lifecycle state. Begin is driven
//! by the driver; the handle itself transitions exactly once, to committed
//! or rolled back, each transition issuing exactly one network call. A
//! failed transition leaves the handle open so the caller may retry the
//! commit or roll back instead.

pub mod registry;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::http::request::{execute, Transport};

pub use registry::{ExecutionContext, TransactionRegistry};

/// Lifecycle state of a transaction handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    Open,
    Committed,
    RolledBack,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionStatus::Open => write!(f, "open"),
            TransactionStatus::Committed => write!(f, "committed"),
            TransactionStatus::RolledBack => write!(f, "rolled back"),
        }
    }
}

/// One server-side transaction, owned exclusively by the execution context
/// that began it
pub trait Transaction {
    /// Commit the transaction. Valid only while open; on failure the handle
    /// stays open so the caller may retry or roll back.
    fn commit(&mut self) -> Result<()>;

    /// Roll the transaction back. Valid only while open.
    fn rollback(&mut self) -> Result<()>;

    /// Current lifecycle state
    fn status(&self) -> TransactionStatus;
}

/// Transaction handle over the HTTP wire protocol
pub struct HttpTransaction {
    transport: Arc<Transport>,
    registry: TransactionRegistry,
    context: ExecutionContext,
    // Assigned by the server at begin time, immutable thereafter
    url: String,
    status: TransactionStatus,
}

impl HttpTransaction {
    pub(crate) fn open(
        transport: Arc<Transport>,
        registry: TransactionRegistry,
        context: ExecutionContext,
        url: String,
    ) -> Self {
        Self {
            transport,
            registry,
            context,
            url,
            status: TransactionStatus::Open,
        }
    }

    /// The transaction-scoped URL assigned by the server
    pub fn url(&self) -> &str {
        &self.url
    }

    fn ensure_open(&self, operation: &str) -> Result<()> {
        if self.status == TransactionStatus::Open {
            return Ok(());
        }
        Err(Error::usage(format!(
            "cannot {operation} a transaction that is already {status}",
            status = self.status
        )))
    }

    fn finish(&mut self, status: TransactionStatus) {
        self.status = status;
        self.registry.release(self.context);
    }
}

impl Transaction for HttpTransaction {
    fn commit(&mut self) -> Result<()> {
        self.ensure_open("commit")?;
        let url = format!("{}/commit", self.url);
        log::debug!("POST {url}");
        let client = self.transport.client()?;
        let executed = execute(client.post(url.as_str()), self.transport.credentials())?;
        executed.outcome.into_result()?;
        self.finish(TransactionStatus::Committed);
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        self.ensure_open("roll back")?;
        log::debug!("DELETE {}", self.url);
        let client = self.transport.client()?;
        let executed = execute(client.delete(self.url.as_str()), self.transport.credentials())?;
        executed.outcome.into_result()?;
        self.finish(TransactionStatus::RolledBack);
        Ok(())
    }

    fn status(&self) -> TransactionStatus {
        self.status
    }
}

impl Drop for HttpTransaction {
    fn drop(&mut self) {
        if self.status == TransactionStatus::Open {
            log::warn!("transaction {} dropped while still open", self.url);
            self.registry.release(self.context);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DriverConfig;
    use reqwest::blocking::Client;

    fn handle_in_state(status: TransactionStatus) -> HttpTransaction {
        let config = DriverConfig::new("http://localhost:7474");
        HttpTransaction {
            transport: Arc::new(Transport::new(config, Client::new())),
            registry: TransactionRegistry::new(),
            context: ExecutionContext::new(),
            url: "http://localhost:7474/db/data/transaction/17".to_string(),
            status,
        }
    }

    #[test]
    fn test_url_is_the_server_assigned_value() {
        let tx = handle_in_state(TransactionStatus::Open);
        assert_eq!(tx.url(), "http://localhost:7474/db/data/transaction/17");
        assert_eq!(tx.status(), TransactionStatus::Open);
    }

    #[test]
    fn test_commit_after_commit_is_usage_error() {
        // No server is listening; a usage error proves no network call was made,
        // since an attempted request would surface as an execution error.
        let mut tx = handle_in_state(TransactionStatus::Committed);
        assert!(matches!(tx.commit(), Err(Error::Usage { .. })));
        assert_eq!(tx.status(), TransactionStatus::Committed);
    }

    #[test]
    fn test_commit_after_rollback_is_usage_error() {
        let mut tx = handle_in_state(TransactionStatus::RolledBack);
        assert!(matches!(tx.commit(), Err(Error::Usage { .. })));
        assert_eq!(tx.status(), TransactionStatus::RolledBack);
    }

    #[test]
    fn test_rollback_after_commit_is_usage_error() {
        let mut tx = handle_in_state(TransactionStatus::Committed);
        assert!(matches!(tx.rollback(), Err(Error::Usage { .. })));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(TransactionStatus::Open.to_string(), "open");
        assert_eq!(TransactionStatus::RolledBack.to_string(), "rolled back");
    }
}
