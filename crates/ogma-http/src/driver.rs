//! The HTTP driver
//!
//! Composes the immutable configuration, the shared blocking transport
//! client, and the injected transaction registry. `request_handler` targets
//! the caller's active transaction when one exists and the auto-commit
//! endpoint otherwise; `new_transaction` begins a server-side transaction
//! and hands back its handle.

use std::sync::Arc;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, CONTENT_TYPE, LOCATION};

use crate::config::DriverConfig;
use crate::error::{Error, Result};
use crate::http::endpoint;
use crate::http::request::{execute, HttpRequest, Request, Transport, ACCEPT_JSON};
use crate::transaction::{ExecutionContext, HttpTransaction, Transaction, TransactionRegistry};

/// A driver exposes request handling and transaction control over one
/// transport. Implementations differ in transport, not in contract.
pub trait Driver {
    type Request: Request;
    type Transaction: Transaction;

    /// A request handler bound to the right target URL for this context.
    /// The target is re-evaluated on every call, never cached: the active
    /// transaction can change between calls on the same driver.
    fn request_handler(&self, context: ExecutionContext) -> Result<Self::Request>;

    /// Begin a server-side transaction owned by this context
    fn new_transaction(&self, context: ExecutionContext) -> Result<Self::Transaction>;

    /// Release the shared transport client. Idempotent; close-time problems
    /// are logged, never propagated.
    fn close(&self);
}

/// Driver over the stateless HTTP wire protocol
pub struct HttpDriver {
    transport: Arc<Transport>,
    registry: TransactionRegistry,
}

impl HttpDriver {
    /// Create a driver with its own pooled transport client
    pub fn new(config: DriverConfig, registry: TransactionRegistry) -> Result<Self> {
        let client = Client::builder().build().map_err(|e| Error::Execution {
            message: "failed to create http transport client".to_string(),
            source: Some(anyhow::Error::new(e)),
        })?;
        Self::with_transport(config, client, registry)
    }

    /// Create a driver around a caller-built transport client, so transport
    /// tuning (timeouts, TLS) stays with the transport rather than this layer
    pub fn with_transport(
        config: DriverConfig,
        client: Client,
        registry: TransactionRegistry,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            transport: Arc::new(Transport::new(config, client)),
            registry,
        })
    }
}

impl Driver for HttpDriver {
    type Request = HttpRequest;
    type Transaction = HttpTransaction;

    fn request_handler(&self, context: ExecutionContext) -> Result<HttpRequest> {
        let url = match self.registry.current_transaction(context) {
            Some(url) => {
                log::debug!("request url {url}");
                url
            }
            None => {
                let url = endpoint::auto_commit_url(self.transport.config().server()?);
                log::debug!("no current transaction, request url {url}");
                url
            }
        };
        Ok(HttpRequest::new(Arc::clone(&self.transport), url))
    }

    fn new_transaction(&self, context: ExecutionContext) -> Result<HttpTransaction> {
        if self.registry.current_transaction(context).is_some() {
            return Err(Error::usage(
                "execution context already has an active transaction",
            ));
        }

        let url = endpoint::transaction_endpoint(self.transport.config().server()?);
        log::debug!("POST {url}");
        let client = self.transport.client()?;
        let request = client
            .post(url.as_str())
            .header(CONTENT_TYPE, ACCEPT_JSON)
            .body("");
        let executed = execute(request, self.transport.credentials())?;
        executed.outcome.into_result()?;

        let location = single_location_header(&executed.headers)?;
        self.registry.bind(context, &location)?;
        Ok(HttpTransaction::open(
            Arc::clone(&self.transport),
            self.registry.clone(),
            context,
            location,
        ))
    }

    fn close(&self) {
        self.transport.close();
    }
}

/// The server acknowledges a begin with exactly one `Location` header whose
/// value is the transaction-scoped URL; anything else aborts creation.
fn single_location_header(headers: &HeaderMap) -> Result<String> {
    let mut values = headers.get_all(LOCATION).iter();
    let location = values.next().ok_or_else(|| {
        Error::execution("transaction begin response carries no Location header")
    })?;
    if values.next().is_some() {
        return Err(Error::execution(
            "transaction begin response carries more than one Location header",
        ));
    }
    location
        .to_str()
        .map(|value| value.to_string())
        .map_err(|e| Error::Execution {
            message: "Location header value is not valid UTF-8".to_string(),
            source: Some(anyhow::Error::new(e)),
        })
}
