//! admin_session - Stateless admin session cookies
//!
//! This crate issues and verifies the HMAC-signed session token that proves a
//! request comes from the single administrator account. Tokens are
//! self-contained: their validity depends only on the configured secret and
//! the token bytes, so nothing is ever stored server side.

mod admin;
mod session;
mod utils;

pub use admin::AdminCredentials;

pub use session::{
    ADMIN_ROLE, Environment, RejectReason, SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME,
    SessionAuthority, SessionConfig, SessionError, SessionEvent, SessionObserver, SessionPayload,
    SessionSecret, expire_cookie, extract_token, extract_token_from_headers, frame_cookie,
    issue_token, log_session_event, verify_token,
};
