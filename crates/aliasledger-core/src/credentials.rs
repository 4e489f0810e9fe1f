//! Secure API-key storage using the system keyring.
//!
//! Persists the API key across launches in the platform's native
//! credential storage:
//! - Linux: Secret Service (GNOME Keyring, `KWallet`)
//! - macOS: Keychain
//! - Windows: Credential Manager
//!
//! The store is behind the [`CredentialStore`] trait so tests (and
//! frontends with their own vaults) can substitute an implementation.

use aliasledger_api::ApiKey;
use keyring::Entry;
use tracing::debug;

/// Service name used for keyring entries.
const SERVICE_NAME: &str = "aliasledger";

/// Credential type identifier for API keys.
const API_KEY_CREDENTIAL: &str = "api_key";

/// Error type for credential operations.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// Failed to access keyring.
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

/// Result type for credential operations.
pub type CredentialResult<T> = std::result::Result<T, CredentialError>;

/// Get/set/remove interface over wherever the API key is persisted.
pub trait CredentialStore: Send + Sync {
    /// Retrieves the stored API key for an account, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn get(&self, account: &str) -> CredentialResult<Option<ApiKey>>;

    /// Stores the API key for an account, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn set(&self, account: &str, api_key: &ApiKey) -> CredentialResult<()>;

    /// Removes the stored API key for an account. Removing an absent key
    /// is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn remove(&self, account: &str) -> CredentialResult<()>;
}

/// Generates the keyring entry key for an account's API key.
fn credential_key(account: &str) -> String {
    format!("{SERVICE_NAME}_{API_KEY_CREDENTIAL}_{account}")
}

/// [`CredentialStore`] backed by the system keyring.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyringStore;

impl CredentialStore for KeyringStore {
    fn get(&self, account: &str) -> CredentialResult<Option<ApiKey>> {
        let key = credential_key(account);
        let entry = Entry::new(SERVICE_NAME, &key)?;
        match entry.get_password() {
            Ok(api_key) => Ok(Some(ApiKey::new(api_key))),
            Err(keyring::Error::NoEntry) => {
                debug!("No stored API key for account {account}");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, account: &str, api_key: &ApiKey) -> CredentialResult<()> {
        let key = credential_key(account);
        let entry = Entry::new(SERVICE_NAME, &key)?;
        entry.set_password(api_key.as_str())?;
        debug!("Stored API key for account {account}");
        Ok(())
    }

    fn remove(&self, account: &str) -> CredentialResult<()> {
        let key = credential_key(account);
        let entry = Entry::new(SERVICE_NAME, &key)?;
        match entry.delete_credential() {
            Ok(()) => {
                debug!("Deleted API key for account {account}");
                Ok(())
            }
            Err(keyring::Error::NoEntry) => {
                debug!("No API key to delete for account {account}");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
