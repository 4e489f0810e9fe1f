//! One authenticated API session per account.
//!
//! [`Session`] replaces the shared-singleton client of older designs:
//! it is constructed once at startup from a [`Config`] and passed by
//! reference to every consumer, which keeps the runtime-editable base
//! URL and the credential lifecycle explicit.

use aliasledger_api::transport::{HttpTransport, Transport};
use aliasledger_api::{ApiClient, ApiKey, UserLogin};
use tracing::{debug, warn};

use crate::config::Config;
use crate::credentials::{CredentialStore, KeyringStore};
use crate::error::{Error, Result};

/// Result of the first login step.
#[derive(Debug)]
pub enum LoginOutcome {
    /// Authentication is complete; the session holds the API key.
    LoggedIn(UserLogin),
    /// The account needs its second factor; finish with
    /// [`Session::verify_mfa`].
    MfaRequired(MfaChallenge),
}

/// Pending second factor handed back by [`Session::log_in`].
#[derive(Debug, Clone)]
pub struct MfaChallenge {
    mfa_key: String,
    email: String,
}

impl MfaChallenge {
    /// Email of the account being authenticated.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// An API client plus the credential lifecycle around it.
pub struct Session<T = HttpTransport> {
    client: ApiClient<T>,
    store: Box<dyn CredentialStore>,
    device: String,
    account: Option<String>,
}

impl Session<HttpTransport> {
    /// Creates an unauthenticated session over the production transport,
    /// persisting credentials in the system keyring.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: Config) -> Result<Self> {
        let client = ApiClient::new(config.api_url).map_err(Error::Api)?;
        Ok(Self::with_parts(client, Box::new(KeyringStore), config.device))
    }
}

impl<T: Transport> Session<T> {
    /// Assembles a session from explicit parts. Tests use this with a
    /// mock transport and an in-memory credential store.
    #[must_use]
    pub fn with_parts(
        client: ApiClient<T>,
        store: Box<dyn CredentialStore>,
        device: impl Into<String>,
    ) -> Self {
        Self {
            client,
            store,
            device: device.into(),
            account: None,
        }
    }

    /// The underlying API client, for direct endpoint calls.
    #[must_use]
    pub const fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    /// Email of the authenticated account, if any.
    #[must_use]
    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    /// Whether the session holds an API key.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.client.api_key().is_some()
    }

    /// Points the session at a different server, e.g. a self-hosted
    /// instance configured in settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the string is not a usable base URL.
    pub fn set_api_url(&mut self, api_url: &str) -> Result<()> {
        self.client.set_base_url(crate::config::parse_api_url(api_url)?);
        Ok(())
    }

    /// First authentication step.
    ///
    /// On an MFA-enabled account this does not authenticate yet: it
    /// returns the challenge to complete with [`Session::verify_mfa`].
    ///
    /// # Errors
    ///
    /// Returns an API error as-is, or [`Error::Login`] if the server's
    /// response is missing the field its flags promise.
    pub async fn log_in(&mut self, email: &str, password: &str) -> Result<LoginOutcome> {
        let login = self.client.login(email, password, &self.device).await?;

        if login.mfa_enabled {
            let mfa_key = login
                .mfa_key
                .clone()
                .ok_or_else(|| Error::Login("MFA required but no mfa_key returned".into()))?;
            debug!("login for {email} needs a second factor");
            return Ok(LoginOutcome::MfaRequired(MfaChallenge {
                mfa_key,
                email: email.to_string(),
            }));
        }

        let api_key = login
            .api_key
            .clone()
            .ok_or_else(|| Error::Login("login returned neither api_key nor mfa_key".into()))?;
        self.adopt_key(email, api_key);
        Ok(LoginOutcome::LoggedIn(login))
    }

    /// Second authentication step, with the user's one-time code.
    ///
    /// # Errors
    ///
    /// Returns an API error as-is (a wrong code surfaces as
    /// [`aliasledger_api::Error::BadRequest`]), or [`Error::Login`] if
    /// the response carries no API key.
    pub async fn verify_mfa(&mut self, challenge: &MfaChallenge, code: &str) -> Result<UserLogin> {
        let login = self
            .client
            .verify_mfa(code, &challenge.mfa_key, &self.device)
            .await?;

        let api_key = login
            .api_key
            .clone()
            .ok_or_else(|| Error::Login("MFA verification returned no api_key".into()))?;
        self.adopt_key(&challenge.email, api_key);
        Ok(login)
    }

    /// Resumes a previous session from the credential store.
    ///
    /// Returns `false` when no key is stored for the account.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential store fails.
    pub fn restore(&mut self, email: &str) -> Result<bool> {
        match self.store.get(email)? {
            Some(api_key) => {
                self.client.set_api_key(Some(api_key));
                self.account = Some(email.to_string());
                debug!("restored session for {email}");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Ends the session: best-effort server-side key revocation, then
    /// removal of the stored credential.
    ///
    /// The revocation call is allowed to fail (the key may already be
    /// revoked, or the server unreachable); the local credential is
    /// removed either way.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential store fails.
    pub async fn log_out(&mut self) -> Result<()> {
        if self.is_authenticated() {
            if let Err(err) = self.client.logout().await {
                warn!("server-side logout failed: {err}");
            }
        }
        if let Some(account) = self.account.take() {
            self.store.remove(&account)?;
        }
        self.client.set_api_key(None);
        Ok(())
    }

    /// Installs a fresh API key and persists it.
    ///
    /// Persistence is best-effort: a keyring failure is logged, not
    /// fatal, since the session is already authenticated in memory.
    fn adopt_key(&mut self, email: &str, api_key: ApiKey) {
        if let Err(err) = self.store.set(email, &api_key) {
            warn!("failed to persist API key for {email}: {err}");
        }
        self.client.set_api_key(Some(api_key));
        self.account = Some(email.to_string());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::credentials::CredentialResult;
    use aliasledger_api::request::ApiRequest;
    use aliasledger_api::transport::{RawResponse, StatusCode};
    use std::collections::{HashMap, VecDeque};
    use std::sync::{Arc, Mutex};
    use url::Url;

    struct MockTransport {
        responses: Mutex<VecDeque<RawResponse>>,
    }

    impl MockTransport {
        fn new(bodies: impl IntoIterator<Item = &'static str>) -> Self {
            let responses = bodies
                .into_iter()
                .map(|body| RawResponse::new(StatusCode::OK, body.as_bytes().to_vec()))
                .collect();
            Self {
                responses: Mutex::new(responses),
            }
        }
    }

    impl Transport for MockTransport {
        async fn execute(
            &self,
            _request: ApiRequest,
        ) -> aliasledger_api::Result<RawResponse> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or(aliasledger_api::Error::UnknownStatusCode(0))
        }
    }

    #[derive(Default, Clone)]
    struct MemoryStore {
        keys: Arc<Mutex<HashMap<String, ApiKey>>>,
    }

    impl CredentialStore for MemoryStore {
        fn get(&self, account: &str) -> CredentialResult<Option<ApiKey>> {
            Ok(self.keys.lock().unwrap().get(account).cloned())
        }

        fn set(&self, account: &str, api_key: &ApiKey) -> CredentialResult<()> {
            self.keys
                .lock()
                .unwrap()
                .insert(account.to_string(), api_key.clone());
            Ok(())
        }

        fn remove(&self, account: &str) -> CredentialResult<()> {
            self.keys.lock().unwrap().remove(account);
            Ok(())
        }
    }

    fn session(
        bodies: impl IntoIterator<Item = &'static str>,
        store: MemoryStore,
    ) -> Session<MockTransport> {
        let client = ApiClient::with_transport(
            Url::parse("https://api.aliasledger.app").unwrap(),
            MockTransport::new(bodies),
        );
        Session::with_parts(client, Box::new(store), "tests")
    }

    const PLAIN_LOGIN: &str = r#"{
        "name": "John Wick",
        "email": "john@example.com",
        "mfa_enabled": false,
        "mfa_key": null,
        "api_key": "key123"
    }"#;

    const MFA_LOGIN: &str = r#"{
        "name": "John Wick",
        "email": "john@example.com",
        "mfa_enabled": true,
        "mfa_key": "mfa-token",
        "api_key": null
    }"#;

    const MFA_VERIFIED: &str = r#"{
        "name": "John Wick",
        "email": "john@example.com",
        "api_key": "key456"
    }"#;

    #[tokio::test]
    async fn test_plain_login_authenticates_and_persists() {
        let store = MemoryStore::default();
        let mut session = session([PLAIN_LOGIN], store.clone());

        let outcome = session.log_in("john@example.com", "pw").await.unwrap();
        assert!(matches!(outcome, LoginOutcome::LoggedIn(_)));
        assert!(session.is_authenticated());
        assert_eq!(session.account(), Some("john@example.com"));
        assert_eq!(
            store.get("john@example.com").unwrap(),
            Some(ApiKey::new("key123"))
        );
    }

    #[tokio::test]
    async fn test_mfa_login_defers_authentication() {
        let store = MemoryStore::default();
        let mut session = session([MFA_LOGIN, MFA_VERIFIED], store.clone());

        let outcome = session.log_in("john@example.com", "pw").await.unwrap();
        let challenge = match outcome {
            LoginOutcome::MfaRequired(challenge) => challenge,
            LoginOutcome::LoggedIn(_) => panic!("expected an MFA challenge"),
        };
        assert!(!session.is_authenticated());
        assert_eq!(challenge.email(), "john@example.com");

        let login = session.verify_mfa(&challenge, "123456").await.unwrap();
        assert_eq!(login.api_key, Some(ApiKey::new("key456")));
        assert!(session.is_authenticated());
        assert_eq!(
            store.get("john@example.com").unwrap(),
            Some(ApiKey::new("key456"))
        );
    }

    #[tokio::test]
    async fn test_restore_resumes_from_stored_key() {
        let store = MemoryStore::default();
        store
            .set("john@example.com", &ApiKey::new("stored-key"))
            .unwrap();
        let mut session = session([], store);

        assert!(session.restore("john@example.com").unwrap());
        assert!(session.is_authenticated());

        let mut fresh = self::session([], MemoryStore::default());
        assert!(!fresh.restore("john@example.com").unwrap());
        assert!(!fresh.is_authenticated());
    }

    #[tokio::test]
    async fn test_log_out_clears_key_even_if_server_unreachable() {
        let store = MemoryStore::default();
        // One login response only: the logout call hits an empty mock and
        // fails, which must not stop the local cleanup.
        let mut session = session([PLAIN_LOGIN], store.clone());
        session.log_in("john@example.com", "pw").await.unwrap();

        session.log_out().await.unwrap();
        assert!(!session.is_authenticated());
        assert_eq!(session.account(), None);
        assert_eq!(store.get("john@example.com").unwrap(), None);
    }
}
