//! Alias types: the forwarding addresses managed by the service.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A disposable forwarding email address.
///
/// Identity is by `id`; every other field is a server-side snapshot.
/// The only fields the client ever changes locally are `enabled` and
/// `pinned`, speculatively, before the confirming round-trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alias {
    /// Unique identifier.
    pub id: u64,
    /// The alias address itself.
    pub email: String,
    /// Optional display name used when sending from the alias.
    pub name: Option<String>,
    /// Whether incoming mail is currently forwarded.
    pub enabled: bool,
    /// Free-form user note.
    pub note: Option<String>,
    /// Number of forwarded messages.
    pub nb_forward: u64,
    /// Number of blocked messages.
    pub nb_block: u64,
    /// Number of replies sent through the alias.
    pub nb_reply: u64,
    /// Creation time as a unix timestamp.
    pub creation_timestamp: i64,
    /// Mailboxes receiving this alias's mail.
    pub mailboxes: Vec<AliasMailbox>,
    /// Whether the user pinned the alias to the top of the list.
    #[serde(default)]
    pub pinned: bool,
}

impl Alias {
    /// Creation time as a UTC datetime, if the timestamp is representable.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.creation_timestamp, 0).single()
    }
}

/// Mailbox reference embedded in alias and custom-domain payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasMailbox {
    /// Mailbox identifier.
    pub id: u64,
    /// Mailbox address.
    pub email: String,
}

/// What happened to a message that passed through an alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityAction {
    /// Message forwarded to a mailbox.
    Forward,
    /// Message blocked because the alias or contact is disabled.
    Block,
    /// Message bounced by the receiving mailbox.
    Bounced,
    /// Outbound reply sent through the reverse-alias.
    Reply,
}

/// One append-only entry in an alias's activity log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasActivity {
    /// What happened.
    pub action: ActivityAction,
    /// Sender address.
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// When it happened, as a unix timestamp.
    pub timestamp: i64,
    /// The reverse-alias display form involved, if any.
    pub reverse_alias: String,
    /// The bare reverse-alias address, if the server included it.
    pub reverse_alias_address: Option<String>,
}

impl AliasActivity {
    /// Event time as a UTC datetime, if the timestamp is representable.
    #[must_use]
    pub fn occurred_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.timestamp, 0).single()
    }
}

/// Options the server offers for creating a custom alias.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasOptions {
    /// Whether the account may create another alias.
    pub can_create: bool,
    /// Prefix the server suggests from the requesting page's hostname.
    #[serde(default)]
    pub prefix_suggestion: String,
    /// Suffixes the alias may end with.
    pub suffixes: Vec<AliasSuffix>,
}

/// One selectable alias suffix.
///
/// The signed form must be echoed back verbatim on creation; the server
/// verifies the signature to stop suffix tampering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasSuffix {
    /// Display form, e.g. `.abc@mydomain.com`.
    pub suffix: String,
    /// Signed form to send back on creation.
    pub signed_suffix: String,
    /// Whether the suffix belongs to a custom domain.
    #[serde(default)]
    pub is_custom: bool,
    /// Whether the suffix's domain is premium-only.
    #[serde(default)]
    pub is_premium: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const ALIAS_JSON: &str = r#"{
        "id": 3,
        "email": "e3@example.com",
        "name": null,
        "enabled": true,
        "note": "For newsletters",
        "nb_forward": 10,
        "nb_block": 0,
        "nb_reply": 2,
        "creation_timestamp": 1586195834,
        "mailboxes": [
            {"id": 1, "email": "inbox@real.example"},
            {"id": 2, "email": "backup@real.example"}
        ],
        "pinned": true
    }"#;

    #[test]
    fn test_alias_decode() {
        let alias: Alias = serde_json::from_str(ALIAS_JSON).unwrap();
        assert_eq!(alias.id, 3);
        assert_eq!(alias.email, "e3@example.com");
        assert!(alias.enabled);
        assert!(alias.pinned);
        assert_eq!(alias.note.as_deref(), Some("For newsletters"));
        assert_eq!(alias.mailboxes.len(), 2);
        assert_eq!(alias.mailboxes[0].email, "inbox@real.example");
    }

    #[test]
    fn test_alias_pinned_defaults_to_false() {
        // Older servers omit the field entirely.
        let json = r#"{
            "id": 3, "email": "e3@example.com", "name": null, "enabled": true,
            "note": null, "nb_forward": 0, "nb_block": 0, "nb_reply": 0,
            "creation_timestamp": 1586195834, "mailboxes": []
        }"#;
        let alias: Alias = serde_json::from_str(json).unwrap();
        assert!(!alias.pinned);
    }

    #[test]
    fn test_alias_created_at() {
        let alias: Alias = serde_json::from_str(ALIAS_JSON).unwrap();
        let created = alias.created_at().unwrap();
        assert_eq!(created.timestamp(), 1_586_195_834);
    }

    #[test]
    fn test_activity_decode() {
        let json = r#"{
            "action": "forward",
            "from": "sender@outside.example",
            "to": "inbox@real.example",
            "timestamp": 1586195834,
            "reverse_alias": "\"sender at outside\" <ra+x@example.com>",
            "reverse_alias_address": "ra+x@example.com"
        }"#;
        let activity: AliasActivity = serde_json::from_str(json).unwrap();
        assert_eq!(activity.action, ActivityAction::Forward);
        assert_eq!(
            activity.reverse_alias_address.as_deref(),
            Some("ra+x@example.com")
        );
    }

    #[test]
    fn test_activity_action_variants() {
        for (text, action) in [
            ("\"forward\"", ActivityAction::Forward),
            ("\"block\"", ActivityAction::Block),
            ("\"bounced\"", ActivityAction::Bounced),
            ("\"reply\"", ActivityAction::Reply),
        ] {
            let parsed: ActivityAction = serde_json::from_str(text).unwrap();
            assert_eq!(parsed, action);
        }
    }

    #[test]
    fn test_alias_options_decode() {
        let json = r#"{
            "can_create": true,
            "prefix_suggestion": "news",
            "suffixes": [
                {"suffix": ".cat@d1.example", "signed_suffix": ".cat@d1.example.Xq2"},
                {"suffix": "@custom.example", "signed_suffix": "@custom.example.9ab", "is_custom": true}
            ]
        }"#;
        let options: AliasOptions = serde_json::from_str(json).unwrap();
        assert!(options.can_create);
        assert_eq!(options.suffixes.len(), 2);
        assert!(options.suffixes[1].is_custom);
        assert!(!options.suffixes[0].is_premium);
    }
}
