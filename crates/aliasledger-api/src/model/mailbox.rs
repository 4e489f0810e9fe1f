//! Mailbox types: the real addresses that receive forwarded mail.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A verified real email address owned by the user.
///
/// Exactly one mailbox carries the `default` flag; the server enforces
/// the exclusivity when another mailbox is made default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mailbox {
    /// Unique identifier.
    pub id: u64,
    /// The mailbox address.
    pub email: String,
    /// Whether new aliases forward here unless told otherwise.
    pub default: bool,
    /// Whether the address completed email verification.
    pub verified: bool,
    /// Number of aliases forwarding to this mailbox.
    pub nb_alias: u64,
    /// Creation time as a unix timestamp.
    pub creation_timestamp: i64,
}

impl Mailbox {
    /// Creation time as a UTC datetime, if the timestamp is representable.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.creation_timestamp, 0).single()
    }
}
