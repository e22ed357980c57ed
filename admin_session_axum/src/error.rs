use admin_session::SessionError;
use http::StatusCode;

/// Helper trait for converting errors to a standard response error format
pub trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)>;
}

/// Every `SessionError` is a server-side fault. Configuration problems are
/// logged for operators and answered with a generic body.
impl<T> IntoResponseError<T> for Result<T, SessionError> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| match e {
            SessionError::Configuration(msg) => {
                tracing::error!("Admin session misconfigured: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server misconfigured".to_string(),
                )
            }
            SessionError::Serialization(_) | SessionError::Cookie(_) => {
                tracing::error!("Admin session error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        })
    }
}
