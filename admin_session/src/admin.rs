use std::fmt;

use subtle::ConstantTimeEq;

use crate::session::SessionError;

const PASSWORD_VAR: &str = "ADMIN_PASSWORD";

/// The single administrator account's password.
///
/// Loading never fails: a missing password only becomes an error when
/// someone tries to log in, so the rest of the site keeps working.
#[derive(Clone, Default)]
pub struct AdminCredentials {
    password: Option<String>,
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("password_set", &self.password.is_some())
            .finish()
    }
}

impl AdminCredentials {
    /// An empty password counts as unset.
    pub fn new(password: impl Into<String>) -> Self {
        let password = password.into();
        Self {
            password: (!password.is_empty()).then_some(password),
        }
    }

    pub fn unset() -> Self {
        Self::default()
    }

    /// Reads `ADMIN_PASSWORD`.
    pub fn from_env() -> Self {
        match std::env::var(PASSWORD_VAR) {
            Ok(password) => Self::new(password),
            Err(_) => Self::unset(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.password.is_some()
    }

    /// Compares `submitted` against the configured password in constant time.
    ///
    /// Returns [`SessionError::Configuration`] when no password is configured.
    pub fn verify_password(&self, submitted: Option<&str>) -> Result<bool, SessionError> {
        let Some(expected) = self.password.as_deref() else {
            return Err(SessionError::Configuration(format!(
                "{PASSWORD_VAR} is not set"
            )));
        };

        let Some(submitted) = submitted.filter(|s| !s.is_empty()) else {
            return Ok(false);
        };

        if submitted.len() != expected.len() {
            return Ok(false);
        }
        Ok(submitted.as_bytes().ct_eq(expected.as_bytes()).into())
    }
}
