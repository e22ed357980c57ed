//! admin_session_axum - axum integration for admin session cookies
//!
//! Provides the login/logout/me endpoints, a `require_admin` middleware and an
//! [`AdminSession`] extractor, all backed by an [`AdminAuth`] state value.

mod error;
mod handlers;
mod middleware;
mod router;
mod session;
mod state;

pub use error::IntoResponseError;
pub use middleware::require_admin;
pub use router::admin_session_router;
pub use session::{AdminSession, AuthRejection};
pub use state::AdminAuth;

// Re-export the core crate so applications need a single dependency
pub use admin_session::{
    AdminCredentials, Environment, SESSION_COOKIE_NAME, SessionAuthority, SessionConfig,
    SessionError, SessionEvent, SessionSecret, log_session_event,
};
