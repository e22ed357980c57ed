//! Signed session token
//!
//! A token is `base64url(JSON(payload)) "." base64url(HMAC-SHA256(secret, first segment))`,
//! both segments without padding. Verification never reveals which check
//! failed; see [`RejectReason`] for the observer-only detail.

use std::time::Duration;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::session::{config::SessionSecret, errors::SessionError, types::SessionPayload};
use crate::utils::{base64url_decode, base64url_encode};

use super::events::RejectReason;

type HmacSha256 = Hmac<Sha256>;

fn sign(secret: &SessionSecret, base: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(base.as_bytes());
    base64url_encode(&mac.finalize().into_bytes())
}

pub(super) fn encode_token(
    secret: &SessionSecret,
    payload: &SessionPayload,
) -> Result<String, SessionError> {
    let json =
        serde_json::to_vec(payload).map_err(|e| SessionError::Serialization(e.to_string()))?;
    let base = base64url_encode(&json);
    let signature = sign(secret, &base);
    Ok(format!("{base}.{signature}"))
}

/// Signs a fresh admin token issued now.
pub fn issue_token(secret: &SessionSecret) -> Result<String, SessionError> {
    encode_token(secret, &SessionPayload::admin_at(Utc::now()))
}

/// Returns `true` only for a well-formed admin token signed with `secret`.
///
/// `None` (no cookie) is simply `false`.
pub fn verify_token(token: Option<&str>, secret: &SessionSecret) -> bool {
    check_token(token, secret, None, Utc::now()).is_ok()
}

pub(super) fn check_token(
    token: Option<&str>,
    secret: &SessionSecret,
    max_age: Option<Duration>,
    now: DateTime<Utc>,
) -> Result<SessionPayload, RejectReason> {
    let token = token.ok_or(RejectReason::MissingToken)?;

    let mut segments = token.split('.');
    let (Some(base), Some(signature), None) = (segments.next(), segments.next(), segments.next())
    else {
        return Err(RejectReason::MalformedToken);
    };

    let expected = sign(secret, base);

    // Length first: the constant-time comparison is only meaningful for equal lengths
    if signature.len() != expected.len() {
        return Err(RejectReason::SignatureMismatch);
    }
    if !bool::from(signature.as_bytes().ct_eq(expected.as_bytes())) {
        return Err(RejectReason::SignatureMismatch);
    }

    let json = base64url_decode(base).map_err(|_| RejectReason::CorruptPayload)?;
    let payload: SessionPayload =
        serde_json::from_slice(&json).map_err(|_| RejectReason::CorruptPayload)?;

    if !payload.is_admin() {
        return Err(RejectReason::WrongRole);
    }

    if let Some(max_age) = max_age {
        let max_age_ms = i64::try_from(max_age.as_millis()).unwrap_or(i64::MAX);
        let age_ms = now.timestamp_millis().saturating_sub(payload.iat);
        if age_ms > max_age_ms || age_ms < -max_age_ms {
            return Err(RejectReason::Expired);
        }
    }

    Ok(payload)
}
