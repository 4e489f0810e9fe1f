//! # aliasledger-api
//!
//! Typed HTTP client for the aliasledger email-alias service REST API.
//!
//! ## Features
//!
//! - **Endpoint descriptors**: every backend operation as a pure value
//!   (method, path, query, body) — no I/O during construction
//! - **Typed errors**: one variant per documented failure class, mapped
//!   from HTTP status codes; nothing is retried internally
//! - **Transport seam**: the dispatcher runs against a [`Transport`]
//!   trait, so tests substitute a mock and exercise the full decode and
//!   error-mapping path without a network
//! - **Declarative decoding**: all models are serde structs; a missing or
//!   renamed field fails at the decode boundary, never silently
//!
//! ## Quick Start
//!
//! ```ignore
//! use aliasledger_api::ApiClient;
//! use url::Url;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let base = Url::parse("https://api.aliasledger.app")?;
//!     let client = ApiClient::new(base)?;
//!
//!     // Authenticate and keep the key for subsequent calls
//!     let login = client.login("john@example.com", "password", "cli").await?;
//!     let client = client.with_api_key(login.api_key.ok_or("MFA required")?);
//!
//!     // First page of aliases
//!     for alias in client.aliases(0, None).await? {
//!         println!("{} (enabled: {})", alias.email, alias.enabled);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod client;
pub mod endpoint;
mod error;
pub mod model;
pub mod request;
pub mod transport;

pub use client::ApiClient;
pub use endpoint::{AliasFilter, AliasPatch, DomainPatch, Endpoint, RandomMode, SettingsPatch};
pub use error::{Error, Result};
pub use model::{
    ActivityAction, Alias, AliasActivity, AliasMailbox, AliasOptions, AliasSuffix, ApiKey,
    Contact, CustomDomain, Mailbox, UsableDomain, UserInfo, UserLogin, UserSettings,
};
pub use request::{ApiRequest, AUTH_HEADER};
pub use transport::{HttpTransport, RawResponse, Transport, REQUEST_TIMEOUT};
