//! Custom domain types.

use serde::{Deserialize, Serialize};

use super::AliasMailbox;

/// A user-owned domain whose aliases the service manages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomDomain {
    /// Unique identifier.
    pub id: u64,
    /// The domain itself, e.g. `mail.example.org`.
    pub domain_name: String,
    /// Optional display name used when sending from the domain's aliases.
    pub name: Option<String>,
    /// Whether DNS ownership verification passed.
    pub is_verified: bool,
    /// Whether unknown local parts auto-create aliases on first receipt.
    pub catch_all: bool,
    /// Whether auto-created aliases get a random prefix.
    pub random_prefix_generation: bool,
    /// Number of aliases under the domain.
    pub nb_alias: u64,
    /// Mailboxes that receive the domain's catch-all mail.
    #[serde(default)]
    pub mailboxes: Vec<AliasMailbox>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_domain_decode() {
        let json = r#"{
            "id": 4,
            "domain_name": "mail.example.org",
            "name": null,
            "is_verified": true,
            "catch_all": true,
            "random_prefix_generation": false,
            "nb_alias": 3,
            "mailboxes": [{"id": 1, "email": "inbox@real.example"}]
        }"#;
        let domain: CustomDomain = serde_json::from_str(json).unwrap();
        assert_eq!(domain.domain_name, "mail.example.org");
        assert!(domain.is_verified);
        assert!(domain.catch_all);
        assert_eq!(domain.mailboxes.len(), 1);
    }

    #[test]
    fn test_custom_domain_without_mailboxes_key() {
        let json = r#"{
            "id": 4,
            "domain_name": "mail.example.org",
            "name": "My domain",
            "is_verified": false,
            "catch_all": false,
            "random_prefix_generation": false,
            "nb_alias": 0
        }"#;
        let domain: CustomDomain = serde_json::from_str(json).unwrap();
        assert!(domain.mailboxes.is_empty());
        assert_eq!(domain.name.as_deref(), Some("My domain"));
    }
}
