//! # aliasledger-core
//!
//! Session and client-state layer for aliasledger frontends.
//!
//! This crate provides:
//! - **Session management** — login, MFA, restore-from-keyring, logout
//! - **Secure credential storage** — the API key in the system keyring
//! - **Paginated list state** — page bookkeeping for aliases, contacts
//!   and activity logs, with the one-in-flight-fetch guard
//! - **Configuration** — vendor-hosted default with a validated,
//!   user-editable base URL override
//!
//! ## Quick Start
//!
//! ```ignore
//! use aliasledger_core::{Config, LoginOutcome, PagedList, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut session = Session::new(Config::new("my frontend")?)?;
//!
//!     match session.log_in("john@example.com", "password").await? {
//!         LoginOutcome::LoggedIn(_) => {}
//!         LoginOutcome::MfaRequired(challenge) => {
//!             let code = "123456"; // from the user's authenticator app
//!             session.verify_mfa(&challenge, code).await?;
//!         }
//!     }
//!
//!     let aliases = PagedList::new();
//!     aliases
//!         .load_more(|page| session.client().aliases(page, None))
//!         .await?;
//!     println!("{} aliases loaded", aliases.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod config;
pub mod credentials;
mod error;
pub mod pagination;
pub mod session;

pub use config::{Config, DEFAULT_API_URL, parse_api_url};
pub use credentials::{CredentialError, CredentialResult, CredentialStore, KeyringStore};
pub use error::{Error, Result};
pub use pagination::{FetchOutcome, PAGE_SIZE, PagedList};
pub use session::{LoginOutcome, MfaChallenge, Session};
