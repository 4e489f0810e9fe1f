//! Turning an endpoint descriptor into a concrete HTTP request.

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use crate::model::ApiKey;

/// Name of the header carrying the API key.
pub const AUTH_HEADER: &str = "Authentication";

/// A fully-formed HTTP request, independent of any transport.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute request URL, query included.
    pub url: Url,
    /// Request headers.
    pub headers: HeaderMap,
    /// Request body bytes, if any.
    pub body: Option<Vec<u8>>,
}

/// Builds the concrete request for `endpoint` against `base_url`.
///
/// `Content-Type: application/json` is set exactly when the endpoint
/// carries a body; the [`AUTH_HEADER`] is set exactly when the endpoint
/// requires authentication.
///
/// # Errors
///
/// - [`Error::MalformedUrl`] when the base URL and path do not combine
///   into a valid URL (the base URL is user-editable, so this is a real
///   failure surface, not a theoretical one).
/// - [`Error::MissingApiKey`] when the endpoint requires authentication
///   and no key is supplied.
/// - [`Error::MalformedApiKey`] when the key cannot be sent as a header.
pub fn build(base_url: &Url, api_key: Option<&ApiKey>, endpoint: &Endpoint) -> Result<ApiRequest> {
    let path = endpoint.path();
    let mut url = base_url
        .join(&path)
        .map_err(|err| Error::MalformedUrl(format!("{base_url}{path}: {err}")))?;

    let query = endpoint.query();
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &query {
            pairs.append_pair(key, value);
        }
    }

    let mut headers = HeaderMap::new();
    if endpoint.requires_auth() {
        let key = api_key.ok_or(Error::MissingApiKey)?;
        let value = HeaderValue::from_str(key.as_str()).map_err(|_| Error::MalformedApiKey)?;
        headers.insert(HeaderName::from_static("authentication"), value);
    }

    let body = endpoint.body()?;
    if body.is_some() {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    Ok(ApiRequest {
        method: endpoint.method(),
        url,
        headers,
        body,
    })
}
