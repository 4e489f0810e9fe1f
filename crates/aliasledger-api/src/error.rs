//! Error types for API operations.

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// API error types.
///
/// The taxonomy is flat: one variant per failure class, mapped either from
/// the local request-construction step, the HTTP transport, or the server's
/// status code. No variant is ever retried internally.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The transport did not produce an HTTP response at all
    /// (DNS failure, connection refused, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The base URL and endpoint path did not combine into a valid URL.
    #[error("Malformed URL: {0}")]
    MalformedUrl(String),

    /// The endpoint requires authentication but no API key was configured.
    #[error("No API key configured for an authenticated endpoint")]
    MissingApiKey,

    /// The API key contains bytes that cannot be sent as an HTTP header.
    #[error("API key is not a valid header value")]
    MalformedApiKey,

    /// A request body failed to serialize as JSON.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// A success response body failed to decode into the expected model.
    #[error("Failed to decode server response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The server rejected the request (400) with an explanation.
    #[error("Bad request: {message}")]
    BadRequest {
        /// Server-supplied error message, or a snippet of the raw body
        /// when the error payload did not have the expected shape.
        message: String,
    },

    /// The API key was missing, invalid or revoked (401).
    #[error("Invalid API key")]
    InvalidApiKey,

    /// The resource already exists, e.g. a duplicate alias or contact (409).
    #[error("Resource already exists")]
    DuplicateResource,

    /// The account must be reactivated before continuing (410).
    #[error("Account reactivation needed")]
    ReactivationNeeded,

    /// The server failed to process the request (500).
    #[error("Internal server error")]
    InternalServerError,

    /// The gateway in front of the API is unhealthy (502).
    #[error("Bad gateway")]
    BadGateway,

    /// Any status code without a dedicated mapping.
    #[error("Unknown status code: {0}")]
    UnknownStatusCode(u16),
}

impl Error {
    /// Creates a bad-request error from a server-supplied message.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }
}
