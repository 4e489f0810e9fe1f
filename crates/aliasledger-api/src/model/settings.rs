//! Account-wide settings.

use serde::{Deserialize, Serialize};

/// How random aliases are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AliasGeneratorMode {
    /// Dictionary words plus digits, e.g. `meadow.brook12`.
    #[default]
    Word,
    /// A random UUID local part.
    Uuid,
}

/// How the original sender appears on forwarded mail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SenderFormat {
    /// `John Doe - john.doe at example.com`.
    #[default]
    #[serde(rename = "AT")]
    At,
    /// `John Doe - john.doe(a)example.com`.
    #[serde(rename = "A")]
    A,
    /// `John Doe` only.
    #[serde(rename = "NAME_ONLY")]
    NameOnly,
}

/// The single per-user settings record.
///
/// Updates replace the record wholesale; there is no per-field versioning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    /// Random alias generation mode.
    pub alias_generator: AliasGeneratorMode,
    /// Whether the service sends notification emails.
    pub notification: bool,
    /// Domain used for random aliases.
    pub random_alias_default_domain: String,
    /// Sender rewriting format on forwarded mail.
    pub sender_format: SenderFormat,
}

/// A domain usable for random aliases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsableDomain {
    /// The domain name.
    pub domain: String,
    /// Whether it is one of the user's custom domains.
    pub is_custom: bool,
}
