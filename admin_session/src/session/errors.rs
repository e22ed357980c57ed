use thiserror::Error;

use crate::utils::UtilError;

/// Errors that cross the session boundary.
///
/// Token verification failures are not errors: they collapse to
/// `false` and are only reported to an observer as a [`RejectReason`].
///
/// [`RejectReason`]: crate::RejectReason
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Required configuration is missing or unusable
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Cookie error: {0}")]
    Cookie(String),
}

impl From<UtilError> for SessionError {
    fn from(err: UtilError) -> Self {
        match err {
            UtilError::Cookie(msg) => SessionError::Cookie(msg),
            UtilError::Format(msg) => SessionError::Serialization(msg),
        }
    }
}
