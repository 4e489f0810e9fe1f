//! The transport seam between request construction and the network.
//!
//! [`Transport`] is the substitution point for tests: the dispatcher only
//! ever sees a [`RawResponse`], so a mock returning canned status/body
//! pairs exercises the whole decode and error-mapping path without a
//! socket.

use std::time::Duration;

pub use reqwest::StatusCode;

use crate::error::Result;
use crate::request::ApiRequest;

/// One global request timeout, configured once on the underlying client.
/// There is no per-call timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// The raw outcome of an executed request: status code plus body bytes,
/// before any decoding.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Creates a raw response from parts.
    #[must_use]
    pub const fn new(status: StatusCode, body: Vec<u8>) -> Self {
        Self { status, body }
    }
}

/// Executes a prepared request and returns the raw response.
///
/// Implementations perform no retries and no recovery; every failure is
/// surfaced to the caller immediately.
pub trait Transport: Send + Sync {
    /// Executes `request` against the network (or a test double).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Http`] when no HTTP response was produced
    /// at all, e.g. on DNS failure or timeout.
    fn execute(&self, request: ApiRequest) -> impl Future<Output = Result<RawResponse>> + Send;
}

/// Production transport backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates the transport with the global timeout applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be constructed.
    pub fn new() -> Result<Self> {
        let client = reqwest::ClientBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }

    /// Wraps an already-configured client, e.g. one with a proxy.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        Ok(RawResponse::new(status, body.to_vec()))
    }
}
