use axum::{
    Json,
    extract::{FromRef, FromRequestParts},
    response::{IntoResponse, Response},
};
use http::{StatusCode, request::Parts};
use serde_json::json;

use super::state::AdminAuth;

/// Rejection for requests without a valid admin session.
///
/// Always the same generic 401 body, whatever check failed.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "ok": false, "error": "Unauthorized" })),
        )
            .into_response()
    }
}

/// Proof that the request carries a valid admin session cookie
///
/// # Example
///
/// ```no_run
/// use axum::{routing::get, Router};
/// use admin_session_axum::{AdminAuth, AdminSession};
///
/// async fn dashboard(_admin: AdminSession) -> &'static str {
///     "pending submissions"
/// }
///
/// # fn app(auth: AdminAuth) -> Router {
/// Router::new()
///     .route("/dashboard", get(dashboard))
///     .with_state(auth)
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AdminSession;

impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
    AdminAuth: FromRef<S>,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AdminAuth::from_ref(state);
        if auth.authority().is_authenticated_headers(&parts.headers) {
            Ok(AdminSession)
        } else {
            tracing::debug!("Rejecting {} {}: no admin session", parts.method, parts.uri);
            Err(AuthRejection)
        }
    }
}
