//! Credential and account types.

use serde::{Deserialize, Serialize};

/// Bearer credential sent in the `Authentication` header on every
/// authenticated call.
///
/// The wrapped string is opaque to the client. `Debug` and `Display`
/// redact it so the key never leaks into logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a raw key string.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the raw key for header construction.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ApiKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

impl std::fmt::Display for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("<redacted>")
    }
}

/// Response to a password login.
///
/// `api_key` is only present when the account has no MFA; otherwise
/// `mfa_key` carries the token to complete the second factor with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLogin {
    /// API key, absent when an MFA round-trip is still required.
    #[serde(default)]
    pub api_key: Option<ApiKey>,
    /// Account email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Whether the account requires a second factor. The MFA verification
    /// response omits the field, hence the default.
    #[serde(default)]
    pub mfa_enabled: bool,
    /// Token for the MFA verification call, present iff `mfa_enabled`.
    #[serde(default)]
    pub mfa_key: Option<String>,
}

/// Read-only snapshot of the account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
    /// Avatar URL, if one is set.
    pub profile_picture_url: Option<String>,
    /// Whether the account has a paid subscription.
    pub is_premium: bool,
    /// Whether the account is in its free trial period.
    pub in_trial: bool,
}
