use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The only role a session token may carry
pub const ADMIN_ROLE: &str = "admin";

/// Signed body of a session token.
///
/// Serializes to compact JSON as `{"role":"admin","iat":<millis>}`. Decoding
/// rejects unknown fields, so anything that is not exactly this shape fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionPayload {
    pub role: String,
    /// Issuance time in milliseconds since the Unix epoch
    pub iat: i64,
}

impl SessionPayload {
    pub fn admin_at(issued_at: DateTime<Utc>) -> Self {
        Self {
            role: ADMIN_ROLE.to_string(),
            iat: issued_at.timestamp_millis(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.iat)
    }
}
