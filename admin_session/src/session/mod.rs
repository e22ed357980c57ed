mod config;
mod errors;
mod main;
mod types;

pub use config::{
    Environment, SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME, SessionConfig, SessionSecret,
};
pub use errors::SessionError;
pub use main::{
    RejectReason, SessionAuthority, SessionEvent, SessionObserver, expire_cookie, extract_token,
    extract_token_from_headers, frame_cookie, issue_token, log_session_event, verify_token,
};
pub use types::{ADMIN_ROLE, SessionPayload};
