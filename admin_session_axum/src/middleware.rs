use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::session::{AdminSession, AuthRejection};
use super::state::AdminAuth;

/// Middleware letting only admin sessions through.
///
/// Use with `axum::middleware::from_fn_with_state(auth, require_admin)`.
/// Unauthenticated requests get a 401 and never reach the inner handler.
/// Authenticated ones carry an [`AdminSession`] in their extensions, readable
/// with `Extension<AdminSession>`.
pub async fn require_admin(State(auth): State<AdminAuth>, mut req: Request, next: Next) -> Response {
    if !auth.authority().is_authenticated_headers(req.headers()) {
        tracing::debug!("Blocked {} {}: no admin session", req.method(), req.uri());
        return AuthRejection.into_response();
    }
    req.extensions_mut().insert(AdminSession);
    next.run(req).await
}
