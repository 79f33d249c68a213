//! Request execution against the graph server
//!
//! One execution path serves every call the driver makes: stamp the Accept
//! header, apply authorization, send through the shared blocking client, and
//! classify the response. Status failures and embedded error payloads come
//! back as classified outcomes; only an unusable transport is an error here.

use std::sync::{Arc, Mutex};

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{HeaderMap, ACCEPT};

use crate::config::DriverConfig;
use crate::error::{Error, Result};
use crate::http::auth::{authorize, Credentials};
use crate::http::response::ResponseOutcome;

pub(crate) const ACCEPT_JSON: &str = "application/json;charset=UTF-8";

/// Shared transport state: the process-wide pooled client plus the immutable
/// configuration it authenticates with.
///
/// The client slot empties exactly once, at close; the mutex is held only to
/// clone a handle or to release the pool, never across a network call.
pub(crate) struct Transport {
    config: DriverConfig,
    client: Mutex<Option<Client>>,
}

impl Transport {
    pub(crate) fn new(config: DriverConfig, client: Client) -> Self {
        Self {
            config,
            client: Mutex::new(Some(client)),
        }
    }

    pub(crate) fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub(crate) fn credentials(&self) -> Option<&Credentials> {
        self.config.credentials()
    }

    /// Clone a handle to the pooled client
    pub(crate) fn client(&self) -> Result<Client> {
        let guard = self
            .client
            .lock()
            .map_err(|_| Error::execution("transport lock poisoned"))?;
        guard
            .clone()
            .ok_or_else(|| Error::usage("driver has been closed"))
    }

    /// Release the pooled client. Idempotent; problems are logged, not
    /// propagated, since the driver is already shutting down.
    pub(crate) fn close(&self) {
        match self.client.lock() {
            Ok(mut guard) => {
                if guard.take().is_some() {
                    log::debug!("http transport released");
                }
            }
            Err(e) => log::warn!("could not release http transport: {e}"),
        }
    }
}

/// A classified response plus the headers the begin path needs (`Location`)
pub(crate) struct ExecutedResponse {
    pub(crate) outcome: ResponseOutcome,
    pub(crate) headers: HeaderMap,
}

/// Execute one request through the shared transport.
///
/// Fails only when the transport itself cannot be used; the original cause
/// is preserved. The reqwest response is consumed or dropped on every path,
/// returning its connection to the pool.
pub(crate) fn execute(
    request: RequestBuilder,
    credentials: Option<&Credentials>,
) -> Result<ExecutedResponse> {
    let request = request.header(ACCEPT, ACCEPT_JSON);
    let request = authorize(request, credentials);
    let response = request.send()?;

    let status = response.status();
    log::debug!("status code: {}", status.as_u16());
    let reason = status.canonical_reason().unwrap_or("");
    let headers = response.headers().clone();

    let body = if status.as_u16() < 300 {
        let text = response.text()?;
        log::debug!("{text}");
        text
    } else {
        // Failed status: the body is never read as a success payload
        String::new()
    };

    Ok(ExecutedResponse {
        outcome: ResponseOutcome::classify(status.as_u16(), reason, &body),
        headers,
    })
}

/// A request handler bound to one target URL
pub trait Request {
    /// Execute a serialized request body against the bound endpoint
    fn execute(&self, body: &str) -> Result<ResponseOutcome>;
}

/// Request handler over the HTTP wire protocol, bound to either a
/// transaction-scoped URL or the auto-commit endpoint
pub struct HttpRequest {
    transport: Arc<Transport>,
    url: String,
}

impl HttpRequest {
    pub(crate) fn new(transport: Arc<Transport>, url: String) -> Self {
        Self { transport, url }
    }

    /// The target URL this handler posts to
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Request for HttpRequest {
    fn execute(&self, body: &str) -> Result<ResponseOutcome> {
        let client = self.transport.client()?;
        log::debug!("POST {}", self.url);
        let request = client.post(self.url.as_str()).body(body.to_string());
        let executed = execute(request, self.transport.credentials())?;
        Ok(executed.outcome)
    }
}
