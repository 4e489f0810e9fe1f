//! Backend operations described as data.
//!
//! An [`Endpoint`] is a pure value: method, path, query pairs and JSON
//! body for one backend call. No I/O happens here. Bodies are serde
//! structs with a fixed field order, so serialization is byte-stable and
//! request fixtures can be compared literally in tests.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Server-side filter for the alias list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasFilter {
    /// Only pinned aliases.
    Pinned,
    /// Only enabled aliases.
    Enabled,
    /// Only disabled aliases.
    Disabled,
}

impl AliasFilter {
    /// Query-parameter key for the filter (the value is always `true`).
    #[must_use]
    pub const fn query_key(self) -> &'static str {
        match self {
            Self::Pinned => "pinned",
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
        }
    }
}

/// Generation mode override for a random alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandomMode {
    /// UUID local part.
    Uuid,
    /// Dictionary words local part.
    Word,
}

impl RandomMode {
    /// Query-parameter value for the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uuid => "uuid",
            Self::Word => "word",
        }
    }
}

/// Partial update of an alias. Unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AliasPatch {
    /// New note text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// New sending display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement set of receiving mailboxes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mailbox_ids: Option<Vec<u64>>,
    /// New pinned state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
}

/// Partial update of a custom domain. Unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainPatch {
    /// New catch-all state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catch_all: Option<bool>,
    /// New random-prefix state for auto-created aliases.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random_prefix_generation: Option<bool>,
    /// New sending display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement set of catch-all mailboxes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mailbox_ids: Option<Vec<u64>>,
}

/// Partial update of the user settings record. Unset fields are left
/// untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsPatch {
    /// New random alias generation mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_generator: Option<crate::model::AliasGeneratorMode>,
    /// New notification-email state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<bool>,
    /// New default domain for random aliases.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random_alias_default_domain: Option<String>,
    /// New sender rewriting format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_format: Option<crate::model::SenderFormat>,
}

/// One backend operation, described entirely as data.
#[derive(Debug, Clone)]
pub enum Endpoint {
    /// Password login, first step of authentication.
    Login {
        /// Account email.
        email: String,
        /// Account password.
        password: String,
        /// Device name shown in the account's API key list.
        device: String,
    },
    /// Second authentication factor.
    Mfa {
        /// The one-time code the user typed.
        mfa_token: String,
        /// Token returned by the login step.
        mfa_key: String,
        /// Device name shown in the account's API key list.
        device: String,
    },
    /// Account registration.
    Register {
        /// Account email.
        email: String,
        /// Account password.
        password: String,
    },
    /// Account activation with the emailed code.
    Activate {
        /// Account email.
        email: String,
        /// Activation code.
        code: String,
    },
    /// Request a fresh activation code.
    Reactivate {
        /// Account email.
        email: String,
    },
    /// Request a password-reset email.
    ForgotPassword {
        /// Account email.
        email: String,
    },
    /// Revoke the API key server-side.
    Logout,
    /// Fetch the account snapshot.
    UserInfo,
    /// Update the profile display name.
    UpdateProfileName {
        /// New name, or `None` to clear it.
        name: Option<String>,
    },
    /// Submit an in-app purchase receipt for subscription validation.
    ProcessPayment {
        /// Base64 receipt blob from the store.
        receipt_data: String,
        /// Whether the receipt comes from the desktop store.
        is_macapp: bool,
    },
    /// Fetch one page of aliases.
    Aliases {
        /// Zero-based page index.
        page: u32,
        /// Optional server-side filter.
        filter: Option<AliasFilter>,
    },
    /// Fetch a single alias.
    GetAlias {
        /// Alias id.
        id: u64,
    },
    /// Fetch creation options (suffixes, quota) for custom aliases.
    AliasOptions,
    /// Create an alias with a chosen prefix and signed suffix.
    CreateCustomAlias {
        /// Local part before the suffix.
        prefix: String,
        /// Signed suffix from [`Endpoint::AliasOptions`], echoed verbatim.
        signed_suffix: String,
        /// Receiving mailboxes.
        mailbox_ids: Vec<u64>,
        /// Optional note.
        note: Option<String>,
        /// Optional sending display name.
        name: Option<String>,
    },
    /// Create a server-generated alias.
    CreateRandomAlias {
        /// Generation mode override.
        mode: Option<RandomMode>,
        /// Optional note.
        note: Option<String>,
    },
    /// Delete an alias.
    DeleteAlias {
        /// Alias id.
        id: u64,
    },
    /// Flip an alias's enabled state.
    ToggleAlias {
        /// Alias id.
        id: u64,
    },
    /// Patch an alias.
    UpdateAlias {
        /// Alias id.
        id: u64,
        /// Fields to change.
        patch: AliasPatch,
    },
    /// Fetch one page of an alias's activity log.
    AliasActivities {
        /// Alias id.
        id: u64,
        /// Zero-based page index.
        page: u32,
    },
    /// Fetch one page of an alias's contacts.
    Contacts {
        /// Alias id.
        alias_id: u64,
        /// Zero-based page index.
        page: u32,
    },
    /// Create a contact (and its reverse-alias) for an alias.
    CreateContact {
        /// Alias id.
        alias_id: u64,
        /// The outside address to reach.
        contact: String,
    },
    /// Delete a contact.
    DeleteContact {
        /// Contact id.
        id: u64,
    },
    /// Flip a contact's block-forwarding state.
    ToggleContact {
        /// Contact id.
        id: u64,
    },
    /// Fetch all mailboxes.
    Mailboxes,
    /// Add a mailbox (triggers a verification email).
    CreateMailbox {
        /// The real address to add.
        email: String,
    },
    /// Delete a mailbox.
    DeleteMailbox {
        /// Mailbox id.
        id: u64,
    },
    /// Make a mailbox the default for new aliases.
    MakeDefaultMailbox {
        /// Mailbox id.
        id: u64,
    },
    /// Fetch all custom domains.
    CustomDomains,
    /// Patch a custom domain.
    UpdateCustomDomain {
        /// Domain id.
        id: u64,
        /// Fields to change.
        patch: DomainPatch,
    },
    /// Fetch the settings record.
    GetSettings,
    /// Patch the settings record.
    UpdateSettings {
        /// Fields to change.
        patch: SettingsPatch,
    },
    /// Fetch the domains usable for random aliases.
    UsableDomains,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
    device: &'a str,
}

#[derive(Serialize)]
struct MfaBody<'a> {
    mfa_token: &'a str,
    mfa_key: &'a str,
    device: &'a str,
}

#[derive(Serialize)]
struct RegisterBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct ActivateBody<'a> {
    email: &'a str,
    code: &'a str,
}

#[derive(Serialize)]
struct EmailBody<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct ProfileNameBody<'a> {
    name: Option<&'a str>,
}

#[derive(Serialize)]
struct PaymentBody<'a> {
    receipt_data: &'a str,
    is_macapp: bool,
}

#[derive(Serialize)]
struct CustomAliasBody<'a> {
    alias_prefix: &'a str,
    signed_suffix: &'a str,
    mailbox_ids: &'a [u64],
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Serialize)]
struct NoteBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<&'a str>,
}

#[derive(Serialize)]
struct ContactBody<'a> {
    contact: &'a str,
}

#[derive(Serialize)]
struct DefaultMailboxBody {
    default: bool,
}

impl Endpoint {
    /// HTTP method of the operation.
    #[must_use]
    pub const fn method(&self) -> Method {
        match self {
            Self::Logout
            | Self::UserInfo
            | Self::Aliases { .. }
            | Self::GetAlias { .. }
            | Self::AliasOptions
            | Self::AliasActivities { .. }
            | Self::Contacts { .. }
            | Self::Mailboxes
            | Self::CustomDomains
            | Self::GetSettings
            | Self::UsableDomains => Method::GET,
            Self::Login { .. }
            | Self::Mfa { .. }
            | Self::Register { .. }
            | Self::Activate { .. }
            | Self::Reactivate { .. }
            | Self::ForgotPassword { .. }
            | Self::ProcessPayment { .. }
            | Self::CreateCustomAlias { .. }
            | Self::CreateRandomAlias { .. }
            | Self::ToggleAlias { .. }
            | Self::CreateContact { .. }
            | Self::ToggleContact { .. }
            | Self::CreateMailbox { .. } => Method::POST,
            Self::DeleteAlias { .. } | Self::DeleteContact { .. } | Self::DeleteMailbox { .. } => {
                Method::DELETE
            }
            Self::UpdateProfileName { .. }
            | Self::UpdateAlias { .. }
            | Self::UpdateCustomDomain { .. }
            | Self::UpdateSettings { .. } => Method::PATCH,
            Self::MakeDefaultMailbox { .. } => Method::PUT,
        }
    }

    /// Path of the operation, relative to the API base URL.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Login { .. } => "/api/auth/login".into(),
            Self::Mfa { .. } => "/api/auth/mfa".into(),
            Self::Register { .. } => "/api/auth/register".into(),
            Self::Activate { .. } => "/api/auth/activate".into(),
            Self::Reactivate { .. } => "/api/auth/reactivate".into(),
            Self::ForgotPassword { .. } => "/api/auth/forgot_password".into(),
            Self::Logout => "/api/logout".into(),
            Self::UserInfo | Self::UpdateProfileName { .. } => "/api/user_info".into(),
            Self::ProcessPayment { .. } => "/api/apple/process_payment".into(),
            Self::Aliases { .. } => "/api/v2/aliases".into(),
            Self::GetAlias { id } | Self::DeleteAlias { id } | Self::UpdateAlias { id, .. } => {
                format!("/api/aliases/{id}")
            }
            Self::AliasOptions => "/api/v5/alias/options".into(),
            Self::CreateCustomAlias { .. } => "/api/v3/alias/custom/new".into(),
            Self::CreateRandomAlias { .. } => "/api/alias/random/new".into(),
            Self::ToggleAlias { id } => format!("/api/aliases/{id}/toggle"),
            Self::AliasActivities { id, .. } => format!("/api/aliases/{id}/activities"),
            Self::Contacts { alias_id, .. } | Self::CreateContact { alias_id, .. } => {
                format!("/api/aliases/{alias_id}/contacts")
            }
            Self::DeleteContact { id } => format!("/api/contacts/{id}"),
            Self::ToggleContact { id } => format!("/api/contacts/{id}/toggle"),
            Self::Mailboxes => "/api/v2/mailboxes".into(),
            Self::CreateMailbox { .. } => "/api/mailboxes".into(),
            Self::DeleteMailbox { id } | Self::MakeDefaultMailbox { id } => {
                format!("/api/mailboxes/{id}")
            }
            Self::CustomDomains => "/api/custom_domains".into(),
            Self::UpdateCustomDomain { id, .. } => format!("/api/custom_domains/{id}"),
            Self::GetSettings | Self::UpdateSettings { .. } => "/api/setting".into(),
            Self::UsableDomains => "/api/v2/setting/domains".into(),
        }
    }

    /// Query parameters of the operation, in a fixed order.
    #[must_use]
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Aliases { page, filter } => {
                let mut pairs = vec![("page_id", page.to_string())];
                if let Some(filter) = filter {
                    pairs.push((filter.query_key(), "true".into()));
                }
                pairs
            }
            Self::AliasActivities { page, .. } | Self::Contacts { page, .. } => {
                vec![("page_id", page.to_string())]
            }
            Self::CreateRandomAlias { mode, .. } => mode
                .map(|mode| vec![("mode", mode.as_str().to_string())])
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    /// JSON body bytes of the operation, if it carries one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] if a body fails to serialize; with the
    /// body shapes defined here that does not happen in practice.
    pub fn body(&self) -> Result<Option<Vec<u8>>> {
        fn encode<B: Serialize>(body: &B) -> Result<Option<Vec<u8>>> {
            serde_json::to_vec(body).map(Some).map_err(Error::Encode)
        }

        match self {
            Self::Login {
                email,
                password,
                device,
            } => encode(&LoginBody {
                email,
                password,
                device,
            }),
            Self::Mfa {
                mfa_token,
                mfa_key,
                device,
            } => encode(&MfaBody {
                mfa_token,
                mfa_key,
                device,
            }),
            Self::Register { email, password } => encode(&RegisterBody { email, password }),
            Self::Activate { email, code } => encode(&ActivateBody { email, code }),
            Self::Reactivate { email } | Self::ForgotPassword { email } => {
                encode(&EmailBody { email })
            }
            Self::UpdateProfileName { name } => encode(&ProfileNameBody {
                name: name.as_deref(),
            }),
            Self::ProcessPayment {
                receipt_data,
                is_macapp,
            } => encode(&PaymentBody {
                receipt_data,
                is_macapp: *is_macapp,
            }),
            Self::CreateCustomAlias {
                prefix,
                signed_suffix,
                mailbox_ids,
                note,
                name,
            } => encode(&CustomAliasBody {
                alias_prefix: prefix,
                signed_suffix,
                mailbox_ids,
                note: note.as_deref(),
                name: name.as_deref(),
            }),
            Self::CreateRandomAlias { note, .. } => encode(&NoteBody {
                note: note.as_deref(),
            }),
            Self::UpdateAlias { patch, .. } => encode(patch),
            Self::CreateContact { contact, .. } => encode(&ContactBody { contact }),
            Self::CreateMailbox { email } => encode(&EmailBody { email }),
            Self::MakeDefaultMailbox { .. } => encode(&DefaultMailboxBody { default: true }),
            Self::UpdateCustomDomain { patch, .. } => encode(patch),
            Self::UpdateSettings { patch } => encode(patch),
            _ => Ok(None),
        }
    }

    /// Whether the operation must carry the `Authentication` header.
    #[must_use]
    pub const fn requires_auth(&self) -> bool {
        !matches!(
            self,
            Self::Login { .. }
                | Self::Mfa { .. }
                | Self::Register { .. }
                | Self::Activate { .. }
                | Self::Reactivate { .. }
                | Self::ForgotPassword { .. }
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn body_string(endpoint: &Endpoint) -> String {
        String::from_utf8(endpoint.body().unwrap().unwrap()).unwrap()
    }

    #[test]
    fn test_login_descriptor() {
        let endpoint = Endpoint::Login {
            email: "john@example.com".into(),
            password: "hunter2".into(),
            device: "cli".into(),
        };
        assert_eq!(endpoint.method(), Method::POST);
        assert_eq!(endpoint.path(), "/api/auth/login");
        assert!(endpoint.query().is_empty());
        assert!(!endpoint.requires_auth());
        assert_eq!(
            body_string(&endpoint),
            r#"{"email":"john@example.com","password":"hunter2","device":"cli"}"#
        );
    }

    #[test]
    fn test_aliases_page_descriptor() {
        let endpoint = Endpoint::Aliases {
            page: 3,
            filter: None,
        };
        assert_eq!(endpoint.method(), Method::GET);
        assert_eq!(endpoint.path(), "/api/v2/aliases");
        assert_eq!(endpoint.query(), vec![("page_id", "3".to_string())]);
        assert!(endpoint.body().unwrap().is_none());
        assert!(endpoint.requires_auth());
    }

    #[test]
    fn test_aliases_filter_descriptor() {
        let endpoint = Endpoint::Aliases {
            page: 0,
            filter: Some(AliasFilter::Pinned),
        };
        assert_eq!(
            endpoint.query(),
            vec![
                ("page_id", "0".to_string()),
                ("pinned", "true".to_string())
            ]
        );
    }

    #[test]
    fn test_toggle_alias_descriptor() {
        let endpoint = Endpoint::ToggleAlias { id: 42 };
        assert_eq!(endpoint.method(), Method::POST);
        assert_eq!(endpoint.path(), "/api/aliases/42/toggle");
        assert!(endpoint.body().unwrap().is_none());
    }

    #[test]
    fn test_update_alias_note_body() {
        let endpoint = Endpoint::UpdateAlias {
            id: 42,
            patch: AliasPatch {
                note: Some("new note".into()),
                ..AliasPatch::default()
            },
        };
        assert_eq!(endpoint.method(), Method::PATCH);
        assert_eq!(endpoint.path(), "/api/aliases/42");
        assert_eq!(body_string(&endpoint), r#"{"note":"new note"}"#);
    }

    #[test]
    fn test_create_contact_descriptor() {
        let endpoint = Endpoint::CreateContact {
            alias_id: 9,
            contact: "friend@outside.example".into(),
        };
        assert_eq!(endpoint.method(), Method::POST);
        assert_eq!(endpoint.path(), "/api/aliases/9/contacts");
        assert_eq!(
            body_string(&endpoint),
            r#"{"contact":"friend@outside.example"}"#
        );
    }

    #[test]
    fn test_create_custom_alias_body_skips_absent_fields() {
        let endpoint = Endpoint::CreateCustomAlias {
            prefix: "news".into(),
            signed_suffix: ".abc@sl.example.Xq2".into(),
            mailbox_ids: vec![1, 2],
            note: None,
            name: None,
        };
        assert_eq!(endpoint.path(), "/api/v3/alias/custom/new");
        assert_eq!(
            body_string(&endpoint),
            r#"{"alias_prefix":"news","signed_suffix":".abc@sl.example.Xq2","mailbox_ids":[1,2]}"#
        );
    }

    #[test]
    fn test_create_random_alias_mode_query() {
        let endpoint = Endpoint::CreateRandomAlias {
            mode: Some(RandomMode::Uuid),
            note: None,
        };
        assert_eq!(endpoint.path(), "/api/alias/random/new");
        assert_eq!(endpoint.query(), vec![("mode", "uuid".to_string())]);
        assert_eq!(body_string(&endpoint), "{}");
    }

    #[test]
    fn test_process_payment_body() {
        let endpoint = Endpoint::ProcessPayment {
            receipt_data: "BASE64==".into(),
            is_macapp: false,
        };
        assert_eq!(endpoint.method(), Method::POST);
        assert_eq!(endpoint.path(), "/api/apple/process_payment");
        assert_eq!(
            body_string(&endpoint),
            r#"{"receipt_data":"BASE64==","is_macapp":false}"#
        );
    }

    #[test]
    fn test_make_default_mailbox_body() {
        let endpoint = Endpoint::MakeDefaultMailbox { id: 5 };
        assert_eq!(endpoint.method(), Method::PUT);
        assert_eq!(endpoint.path(), "/api/mailboxes/5");
        assert_eq!(body_string(&endpoint), r#"{"default":true}"#);
    }

    #[test]
    fn test_auth_exempt_endpoints() {
        let exempt = [
            Endpoint::Login {
                email: String::new(),
                password: String::new(),
                device: String::new(),
            },
            Endpoint::Register {
                email: String::new(),
                password: String::new(),
            },
            Endpoint::ForgotPassword {
                email: String::new(),
            },
        ];
        for endpoint in exempt {
            assert!(!endpoint.requires_auth(), "{endpoint:?}");
        }
        assert!(Endpoint::Logout.requires_auth());
        assert!(Endpoint::UserInfo.requires_auth());
    }

    proptest! {
        // Note bodies must survive JSON encoding for any text the user can
        // type, including quotes, backslashes and newlines.
        #[test]
        fn test_alias_note_round_trips(note in ".*") {
            let patch = AliasPatch {
                note: Some(note.clone()),
                ..AliasPatch::default()
            };
            let bytes = serde_json::to_vec(&patch).unwrap();
            let decoded: AliasPatch = serde_json::from_slice(&bytes).unwrap();
            prop_assert_eq!(decoded.note.as_deref(), Some(note.as_str()));
        }
    }

    #[test]
    fn test_alias_note_round_trips_json_significant_chars() {
        for note in ["", "\"", "\\", "line\nbreak", "mix\"\\\n"] {
            let patch = AliasPatch {
                note: Some(note.into()),
                ..AliasPatch::default()
            };
            let bytes = serde_json::to_vec(&patch).unwrap();
            let decoded: AliasPatch = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(decoded.note.as_deref(), Some(note));
        }
    }
}
