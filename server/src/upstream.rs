//! Executes provider requests built by `scraper_core` over reqwest.
//!
//! Every call is bounded by the request's own timeout and races a shutdown
//! channel, so in-flight calls are aborted when the server stops. When a
//! client disconnects, axum drops the handler future, which drops the
//! reqwest future with it.

use std::time::Duration;

use scraper_core::{HttpMethod, HttpRequest, HttpResponse};
use thiserror::Error;
use tokio::sync::watch;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport-level failure: no HTTP status was received.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timeout: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("request cancelled by shutdown")]
    Cancelled,
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout(e.to_string())
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else {
            TransportError::Request(e.to_string())
        }
    }
}

/// Shared outbound HTTP client. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Upstream {
    client: reqwest::Client,
    shutdown: watch::Receiver<bool>,
}

impl Upstream {
    pub fn new(shutdown: watch::Receiver<bool>) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("product-proxy/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        Ok(Self { client, shutdown })
    }

    /// Perform one round-trip. Any HTTP status is returned as data.
    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        tokio::select! {
            biased;
            () = cancelled(self.shutdown.clone()) => Err(TransportError::Cancelled),
            result = self.send(request) => result,
        }
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
        };

        let response = builder.timeout(request.timeout).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}

/// Resolves once shutdown is requested. Never resolves if the sender is gone.
async fn cancelled(mut shutdown: watch::Receiver<bool>) {
    let closed = shutdown.wait_for(|stop| *stop).await.is_err();
    if closed {
        std::future::pending::<()>().await;
    }
}
