//! Value types mirroring the server's JSON payloads.
//!
//! Every type here is produced by decoding a server response; the client
//! never constructs or mutates them beyond replacing whole records. JSON
//! keys are snake_case and map directly onto field names, so only enums
//! carry `serde(rename)` attributes.

mod alias;
mod contact;
mod domain;
mod mailbox;
mod settings;
mod user;

pub use alias::{
    ActivityAction, Alias, AliasActivity, AliasMailbox, AliasOptions, AliasSuffix,
};
pub use contact::Contact;
pub use domain::CustomDomain;
pub use mailbox::Mailbox;
pub use settings::{AliasGeneratorMode, SenderFormat, UsableDomain, UserSettings};
pub use user::{ApiKey, UserInfo, UserLogin};

use serde::{Deserialize, Serialize};

/// Envelope for a page of aliases.
#[derive(Debug, Clone, Deserialize)]
pub struct AliasesEnvelope {
    /// The page of aliases, insertion-ordered by the server.
    pub aliases: Vec<Alias>,
}

/// Envelope for a page of alias activities.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivitiesEnvelope {
    /// The page of activity log entries, newest first.
    pub activities: Vec<AliasActivity>,
}

/// Envelope for a page of contacts.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactsEnvelope {
    /// The page of contacts.
    pub contacts: Vec<Contact>,
}

/// Envelope for the full mailbox list.
#[derive(Debug, Clone, Deserialize)]
pub struct MailboxesEnvelope {
    /// All mailboxes of the account.
    pub mailboxes: Vec<Mailbox>,
}

/// Envelope for the full custom-domain list.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomDomainsEnvelope {
    /// All custom domains of the account.
    pub custom_domains: Vec<CustomDomain>,
}

/// Acknowledgement for a delete operation.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Deleted {
    /// Whether the server deleted the resource.
    pub deleted: bool,
}

/// Acknowledgement for an alias toggle.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Enabled {
    /// The alias's enabled state after the toggle.
    pub enabled: bool,
}

/// Acknowledgement for a contact toggle.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ContactToggled {
    /// Whether forwarding from this contact is now blocked.
    pub block_forward: bool,
}

/// Generic `{"ok": true}` acknowledgement.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OkAck {
    /// Whether the operation succeeded.
    pub ok: bool,
}

/// Error payload the server attaches to 400 responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable explanation of the rejection.
    pub error: String,
}
