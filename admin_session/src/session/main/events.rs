//! Observability hook for the session authority.
//!
//! The authority itself never logs. It reports what happened to an optional
//! observer so that the embedding application decides where events go.

use std::fmt;
use std::sync::Arc;

/// Callback receiving every [`SessionEvent`] emitted by a `SessionAuthority`
pub type SessionObserver = Arc<dyn Fn(&SessionEvent) + Send + Sync>;

/// Why a token failed verification.
///
/// Only observers see this. Callers of `verify` get a plain `false` for every
/// variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// No session cookie in the request
    MissingToken,
    /// Not exactly two `.`-separated segments
    MalformedToken,
    /// Signature length or bytes differ from the expected signature
    SignatureMismatch,
    /// Payload segment is not base64url or not a well-formed payload
    CorruptPayload,
    /// Payload role is not `admin`
    WrongRole,
    /// Issuance timestamp outside the configured token max-age
    Expired,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RejectReason::MissingToken => "missing token",
            RejectReason::MalformedToken => "malformed token",
            RejectReason::SignatureMismatch => "signature mismatch",
            RejectReason::CorruptPayload => "corrupt payload",
            RejectReason::WrongRole => "wrong role",
            RejectReason::Expired => "expired",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new token was signed; carries the issuance time in millis
    Issued { issued_at: i64 },
    Verified { issued_at: i64 },
    Rejected(RejectReason),
    /// A logout directive was produced
    Cleared,
}

/// Observer that forwards events to `tracing`.
pub fn log_session_event(event: &SessionEvent) {
    match event {
        SessionEvent::Issued { issued_at } => {
            tracing::info!(issued_at, "Issued admin session token");
        }
        SessionEvent::Verified { issued_at } => {
            tracing::debug!(issued_at, "Admin session verified");
        }
        SessionEvent::Rejected(RejectReason::MissingToken) => {
            tracing::debug!("No admin session cookie");
        }
        SessionEvent::Rejected(reason) => {
            tracing::warn!(%reason, "Admin session rejected");
        }
        SessionEvent::Cleared => {
            tracing::debug!("Admin session cookie cleared");
        }
    }
}
