//! Client configuration: API base URL and device identity.

use url::Url;

use crate::error::{Error, Result};

/// The vendor-hosted API endpoint, used unless the user overrides it.
pub const DEFAULT_API_URL: &str = "https://api.aliasledger.app";

/// Configuration for one API session.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the API server.
    pub api_url: Url,
    /// Device name shown in the account's API key list.
    pub device: String,
}

impl Config {
    /// Creates a configuration pointing at the vendor-hosted endpoint.
    ///
    /// # Errors
    ///
    /// Does not fail in practice; the error covers the parse of the
    /// built-in default URL.
    pub fn new(device: impl Into<String>) -> Result<Self> {
        Ok(Self {
            api_url: parse_api_url(DEFAULT_API_URL)?,
            device: device.into(),
        })
    }

    /// Overrides the API base URL, validating the user-supplied string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the string is not a usable http(s)
    /// base URL.
    pub fn with_api_url(mut self, api_url: &str) -> Result<Self> {
        self.api_url = parse_api_url(api_url)?;
        Ok(self)
    }
}

/// Validates a user-supplied API base URL.
///
/// The base URL is editable in client settings, and a bad value used to
/// surface only later as a malformed request. Validating here keeps the
/// failure at the settings boundary instead.
///
/// # Errors
///
/// Returns [`Error::Config`] when the string does not parse, is not
/// http(s), lacks a host, or carries a query/fragment.
pub fn parse_api_url(input: &str) -> Result<Url> {
    let url =
        Url::parse(input).map_err(|err| Error::Config(format!("invalid API URL: {err}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "API URL must be http or https, got {}",
            url.scheme()
        )));
    }
    if url.host_str().is_none() {
        return Err(Error::Config("API URL has no host".into()));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(Error::Config(
            "API URL must not carry a query or fragment".into(),
        ));
    }

    Ok(url)
}
