//! Contact types: outside addresses reachable through a reverse-alias.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// An outside correspondent of one alias.
///
/// The reverse-alias lets the user reply to `contact` without exposing
/// the real mailbox address. Identity is by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    /// Unique identifier.
    pub id: u64,
    /// The outside email address.
    pub contact: String,
    /// Reverse-alias in display form, e.g. `"name at host" <ra+x@sl.example>`.
    pub reverse_alias: String,
    /// Bare reverse-alias address.
    pub reverse_alias_address: String,
    /// Creation time as a unix timestamp.
    pub creation_timestamp: i64,
    /// When the user last sent mail through the reverse-alias, if ever.
    pub last_email_sent_timestamp: Option<i64>,
    /// Whether forwarding from this contact is blocked.
    #[serde(default)]
    pub block_forward: bool,
}

impl Contact {
    /// Creation time as a UTC datetime, if the timestamp is representable.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.creation_timestamp, 0).single()
    }

    /// Time of the last outbound email, if any.
    #[must_use]
    pub fn last_email_sent_at(&self) -> Option<DateTime<Utc>> {
        self.last_email_sent_timestamp
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
    }
}
