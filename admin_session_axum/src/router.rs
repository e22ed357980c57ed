use axum::{
    Router,
    extract::FromRef,
    routing::{get, post},
};

use super::handlers::{login, logout, me};
use super::state::AdminAuth;

/// Router with the admin session endpoints:
/// - `POST /login` with a JSON body `{"password": "..."}`
/// - `POST /logout`
/// - `GET /me`
///
/// Nest it wherever the admin API lives, e.g. `.nest("/api/admin", admin_session_router())`.
pub fn admin_session_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    AdminAuth: FromRef<S>,
{
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}
