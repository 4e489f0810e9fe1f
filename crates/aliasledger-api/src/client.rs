//! The typed API client: one async method per backend operation.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::endpoint::{AliasFilter, AliasPatch, DomainPatch, Endpoint, RandomMode, SettingsPatch};
use crate::error::{Error, Result};
use crate::model::{
    ActivitiesEnvelope, Alias, AliasActivity, AliasOptions, AliasesEnvelope, ApiKey, Contact,
    ContactToggled, ContactsEnvelope, CustomDomain, CustomDomainsEnvelope, Deleted, Enabled,
    ErrorBody, Mailbox, MailboxesEnvelope, OkAck, UsableDomain, UserInfo, UserLogin, UserSettings,
};
use crate::request;
use crate::transport::{HttpTransport, RawResponse, Transport};

/// Maximum raw-body snippet length kept in a fallback 400 message.
const ERROR_SNIPPET_LEN: usize = 200;

/// Typed client for the alias-service REST API.
///
/// Constructed once and passed by reference to every consumer; there is
/// no shared global instance. The base URL is user-editable at runtime
/// via [`ApiClient::set_base_url`]. Calls are plain async round-trips:
/// no retries, no internal recovery, no cancellation beyond dropping the
/// future.
#[derive(Debug, Clone)]
pub struct ApiClient<T = HttpTransport> {
    base_url: Url,
    api_key: Option<ApiKey>,
    transport: T,
}

impl ApiClient<HttpTransport> {
    /// Creates a client over the production HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self> {
        Ok(Self::with_transport(base_url, HttpTransport::new()?))
    }
}

impl<T: Transport> ApiClient<T> {
    /// Creates a client over an arbitrary transport (a mock, in tests).
    #[must_use]
    pub const fn with_transport(base_url: Url, transport: T) -> Self {
        Self {
            base_url,
            api_key: None,
            transport,
        }
    }

    /// Sets the API key on a freshly-built client.
    #[must_use]
    pub fn with_api_key(mut self, api_key: ApiKey) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Replaces (or clears) the API key.
    pub fn set_api_key(&mut self, api_key: Option<ApiKey>) {
        self.api_key = api_key;
    }

    /// Returns the configured API key, if any.
    #[must_use]
    pub const fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    /// Returns the current base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Points the client at a different server.
    pub fn set_base_url(&mut self, base_url: Url) {
        self.base_url = base_url;
    }

    async fn execute(&self, endpoint: &Endpoint) -> Result<RawResponse> {
        let request = request::build(&self.base_url, self.api_key.as_ref(), endpoint)?;
        debug!(method = %request.method, url = %request.url, "executing API request");
        self.transport.execute(request).await
    }

    async fn call<M: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<M> {
        let response = self.execute(endpoint).await?;
        dispatch(&response)
    }

    /// Like [`ApiClient::call`] but ignores the success body. Used for
    /// acknowledgement-only operations whose payload shape varies across
    /// server versions.
    async fn call_ignoring_body(&self, endpoint: &Endpoint) -> Result<()> {
        let response = self.execute(endpoint).await?;
        check_status(&response)
    }

    // --- auth ---

    /// Logs in with email and password.
    ///
    /// When the returned record has `mfa_enabled` set, authentication is
    /// not finished: complete it with [`ApiClient::verify_mfa`] using the
    /// returned `mfa_key`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-success status.
    pub async fn login(&self, email: &str, password: &str, device: &str) -> Result<UserLogin> {
        self.call(&Endpoint::Login {
            email: email.into(),
            password: password.into(),
            device: device.into(),
        })
        .await
    }

    /// Completes an MFA login with the user's one-time code.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-success status.
    pub async fn verify_mfa(
        &self,
        mfa_token: &str,
        mfa_key: &str,
        device: &str,
    ) -> Result<UserLogin> {
        self.call(&Endpoint::Mfa {
            mfa_token: mfa_token.into(),
            mfa_key: mfa_key.into(),
            device: device.into(),
        })
        .await
    }

    /// Registers a new account. The server emails an activation code.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-success status.
    pub async fn register(&self, email: &str, password: &str) -> Result<()> {
        self.call_ignoring_body(&Endpoint::Register {
            email: email.into(),
            password: password.into(),
        })
        .await
    }

    /// Activates a registered account with the emailed code.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-success status;
    /// [`Error::ReactivationNeeded`] means the code expired.
    pub async fn activate(&self, email: &str, code: &str) -> Result<()> {
        self.call_ignoring_body(&Endpoint::Activate {
            email: email.into(),
            code: code.into(),
        })
        .await
    }

    /// Requests a fresh activation code.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-success status.
    pub async fn reactivate(&self, email: &str) -> Result<()> {
        self.call_ignoring_body(&Endpoint::Reactivate {
            email: email.into(),
        })
        .await
    }

    /// Requests a password-reset email.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-success status.
    pub async fn forgot_password(&self, email: &str) -> Result<()> {
        self.call_ignoring_body(&Endpoint::ForgotPassword {
            email: email.into(),
        })
        .await
    }

    /// Revokes the current API key server-side.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-success status.
    pub async fn logout(&self) -> Result<()> {
        self.call_ignoring_body(&Endpoint::Logout).await
    }

    // --- account ---

    /// Fetches the account snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-success status.
    pub async fn user_info(&self) -> Result<UserInfo> {
        self.call(&Endpoint::UserInfo).await
    }

    /// Updates the profile display name; `None` clears it.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-success status.
    pub async fn update_profile_name(&self, name: Option<&str>) -> Result<UserInfo> {
        self.call(&Endpoint::UpdateProfileName {
            name: name.map(Into::into),
        })
        .await
    }

    /// Submits an in-app purchase receipt for subscription validation.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-success status;
    /// a rejected receipt surfaces as [`Error::BadRequest`].
    pub async fn process_payment(&self, receipt_data: &str, is_macapp: bool) -> Result<()> {
        self.call_ignoring_body(&Endpoint::ProcessPayment {
            receipt_data: receipt_data.into(),
            is_macapp,
        })
        .await
    }

    // --- aliases ---

    /// Fetches one page of aliases (server page size is 20).
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-success status.
    pub async fn aliases(&self, page: u32, filter: Option<AliasFilter>) -> Result<Vec<Alias>> {
        let envelope: AliasesEnvelope = self.call(&Endpoint::Aliases { page, filter }).await?;
        Ok(envelope.aliases)
    }

    /// Fetches a single alias by id.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-success status.
    pub async fn get_alias(&self, id: u64) -> Result<Alias> {
        self.call(&Endpoint::GetAlias { id }).await
    }

    /// Fetches custom-alias creation options.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-success status.
    pub async fn alias_options(&self) -> Result<AliasOptions> {
        self.call(&Endpoint::AliasOptions).await
    }

    /// Creates an alias from a prefix and a signed suffix.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-success status;
    /// an already-taken address surfaces as [`Error::DuplicateResource`].
    pub async fn create_custom_alias(
        &self,
        prefix: &str,
        signed_suffix: &str,
        mailbox_ids: Vec<u64>,
        note: Option<&str>,
        name: Option<&str>,
    ) -> Result<Alias> {
        self.call(&Endpoint::CreateCustomAlias {
            prefix: prefix.into(),
            signed_suffix: signed_suffix.into(),
            mailbox_ids,
            note: note.map(Into::into),
            name: name.map(Into::into),
        })
        .await
    }

    /// Creates a server-generated alias.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-success status.
    pub async fn create_random_alias(
        &self,
        mode: Option<RandomMode>,
        note: Option<&str>,
    ) -> Result<Alias> {
        self.call(&Endpoint::CreateRandomAlias {
            mode,
            note: note.map(Into::into),
        })
        .await
    }

    /// Deletes an alias. The caller removes it from its own list after
    /// this returns.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-success status.
    pub async fn delete_alias(&self, id: u64) -> Result<()> {
        let _: Deleted = self.call(&Endpoint::DeleteAlias { id }).await?;
        Ok(())
    }

    /// Flips an alias's enabled state and returns the new state.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-success status.
    pub async fn toggle_alias(&self, id: u64) -> Result<bool> {
        let ack: Enabled = self.call(&Endpoint::ToggleAlias { id }).await?;
        Ok(ack.enabled)
    }

    /// Applies a partial update to an alias.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-success status.
    pub async fn update_alias(&self, id: u64, patch: AliasPatch) -> Result<()> {
        let _: OkAck = self.call(&Endpoint::UpdateAlias { id, patch }).await?;
        Ok(())
    }

    /// Fetches one page of an alias's activity log.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-success status.
    pub async fn alias_activities(&self, id: u64, page: u32) -> Result<Vec<AliasActivity>> {
        let envelope: ActivitiesEnvelope =
            self.call(&Endpoint::AliasActivities { id, page }).await?;
        Ok(envelope.activities)
    }

    // --- contacts ---

    /// Fetches one page of an alias's contacts.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-success status.
    pub async fn contacts(&self, alias_id: u64, page: u32) -> Result<Vec<Contact>> {
        let envelope: ContactsEnvelope = self.call(&Endpoint::Contacts { alias_id, page }).await?;
        Ok(envelope.contacts)
    }

    /// Creates a contact (and its reverse-alias) for an alias.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-success status;
    /// an existing contact surfaces as [`Error::DuplicateResource`].
    pub async fn create_contact(&self, alias_id: u64, contact: &str) -> Result<Contact> {
        self.call(&Endpoint::CreateContact {
            alias_id,
            contact: contact.into(),
        })
        .await
    }

    /// Deletes a contact.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-success status.
    pub async fn delete_contact(&self, id: u64) -> Result<()> {
        let _: Deleted = self.call(&Endpoint::DeleteContact { id }).await?;
        Ok(())
    }

    /// Flips a contact's block-forwarding state and returns the new state.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-success status.
    pub async fn toggle_contact(&self, id: u64) -> Result<bool> {
        let ack: ContactToggled = self.call(&Endpoint::ToggleContact { id }).await?;
        Ok(ack.block_forward)
    }

    // --- mailboxes ---

    /// Fetches all mailboxes.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-success status.
    pub async fn mailboxes(&self) -> Result<Vec<Mailbox>> {
        let envelope: MailboxesEnvelope = self.call(&Endpoint::Mailboxes).await?;
        Ok(envelope.mailboxes)
    }

    /// Adds a mailbox; the server sends it a verification email.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-success status.
    pub async fn create_mailbox(&self, email: &str) -> Result<Mailbox> {
        self.call(&Endpoint::CreateMailbox {
            email: email.into(),
        })
        .await
    }

    /// Deletes a mailbox.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-success status.
    pub async fn delete_mailbox(&self, id: u64) -> Result<()> {
        let _: Deleted = self.call(&Endpoint::DeleteMailbox { id }).await?;
        Ok(())
    }

    /// Makes a mailbox the default; the server clears the flag on the
    /// previous default.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-success status.
    pub async fn make_default_mailbox(&self, id: u64) -> Result<()> {
        self.call_ignoring_body(&Endpoint::MakeDefaultMailbox { id })
            .await
    }

    // --- custom domains ---

    /// Fetches all custom domains.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-success status.
    pub async fn custom_domains(&self) -> Result<Vec<CustomDomain>> {
        let envelope: CustomDomainsEnvelope = self.call(&Endpoint::CustomDomains).await?;
        Ok(envelope.custom_domains)
    }

    /// Applies a partial update to a custom domain.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-success status.
    pub async fn update_custom_domain(&self, id: u64, patch: DomainPatch) -> Result<()> {
        self.call_ignoring_body(&Endpoint::UpdateCustomDomain { id, patch })
            .await
    }

    // --- settings ---

    /// Fetches the settings record.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-success status.
    pub async fn settings(&self) -> Result<UserSettings> {
        self.call(&Endpoint::GetSettings).await
    }

    /// Applies a partial update and returns the full replacement record.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-success status.
    pub async fn update_settings(&self, patch: SettingsPatch) -> Result<UserSettings> {
        self.call(&Endpoint::UpdateSettings { patch }).await
    }

    /// Fetches the domains usable for random aliases.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-success status.
    pub async fn usable_domains(&self) -> Result<Vec<UsableDomain>> {
        self.call(&Endpoint::UsableDomains).await
    }
}

/// Maps the status code to a typed error; `Ok` only for 200/201.
fn check_status(response: &RawResponse) -> Result<()> {
    match response.status.as_u16() {
        200 | 201 => Ok(()),
        400 => Err(bad_request_error(&response.body)),
        401 => Err(Error::InvalidApiKey),
        409 => Err(Error::DuplicateResource),
        410 => Err(Error::ReactivationNeeded),
        500 => Err(Error::InternalServerError),
        502 => Err(Error::BadGateway),
        code => Err(Error::UnknownStatusCode(code)),
    }
}

/// Status check plus JSON decode. A body that fails to decode after a
/// success status is [`Error::Decode`], never a false success.
fn dispatch<M: DeserializeOwned>(response: &RawResponse) -> Result<M> {
    check_status(response)?;
    serde_json::from_slice(&response.body).map_err(Error::Decode)
}

/// Decodes the server's 400 payload; falls back to a raw-body snippet
/// when the payload does not have the `{"error": ...}` shape.
fn bad_request_error(body: &[u8]) -> Error {
    if let Ok(payload) = serde_json::from_slice::<ErrorBody>(body) {
        return Error::bad_request(payload.error);
    }

    let raw = String::from_utf8_lossy(body);
    let raw = raw.trim();
    if raw.is_empty() {
        Error::bad_request("the server rejected the request")
    } else {
        let snippet: String = raw.chars().take(ERROR_SNIPPET_LEN).collect();
        Error::bad_request(format!("the server rejected the request: {snippet}"))
    }
}
