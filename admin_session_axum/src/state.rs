use std::sync::Arc;

use admin_session::{AdminCredentials, SessionAuthority, SessionError, log_session_event};

/// Shared state for the admin endpoints.
///
/// Put it in your application state and implement `FromRef` for it, or use it
/// as the router state directly.
#[derive(Clone, Debug)]
pub struct AdminAuth {
    authority: Arc<SessionAuthority>,
    credentials: Arc<AdminCredentials>,
}

impl AdminAuth {
    pub fn new(authority: SessionAuthority, credentials: AdminCredentials) -> Self {
        Self {
            authority: Arc::new(authority),
            credentials: Arc::new(credentials),
        }
    }

    /// Loads the session configuration and admin password from the
    /// environment, logging session events through `tracing`.
    ///
    /// Fails when `ADMIN_SESSION_SECRET` is missing; a missing
    /// `ADMIN_PASSWORD` only surfaces at login.
    pub fn from_env() -> Result<Self, SessionError> {
        let authority = SessionAuthority::from_env()?.with_observer(log_session_event);
        let credentials = AdminCredentials::from_env();
        if !credentials.is_configured() {
            tracing::warn!("ADMIN_PASSWORD is not set; admin login is disabled");
        }
        Ok(Self::new(authority, credentials))
    }

    pub fn authority(&self) -> &SessionAuthority {
        &self.authority
    }

    pub fn credentials(&self) -> &AdminCredentials {
        &self.credentials
    }
}
