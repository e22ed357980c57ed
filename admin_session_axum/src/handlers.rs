use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde::Deserialize;
use serde_json::json;

use super::error::IntoResponseError;
use super::state::AdminAuth;

#[derive(Debug, Deserialize)]
pub(super) struct LoginRequest {
    password: Option<String>,
}

/// Checks the submitted password and issues the session cookie.
///
/// A body that is not a JSON object is treated as a missing password.
pub(super) async fn login(
    State(auth): State<AdminAuth>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, (StatusCode, String)> {
    let password = match body {
        Ok(Json(body)) => body.password,
        Err(rejection) => {
            tracing::debug!("Unreadable login body: {rejection}");
            None
        }
    };

    let valid = auth
        .credentials()
        .verify_password(password.as_deref())
        .into_response_error()?;

    if !valid {
        tracing::warn!("Admin login with invalid password");
        return Ok((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "ok": false, "error": "Invalid password" })),
        )
            .into_response());
    }

    let headers = auth.authority().login_headers().into_response_error()?;
    tracing::info!("Admin logged in");
    Ok((headers, Json(json!({ "ok": true }))).into_response())
}

/// Clears the session cookie. Works whether or not a session exists.
pub(super) async fn logout(
    State(auth): State<AdminAuth>,
) -> Result<Response, (StatusCode, String)> {
    let headers = auth.authority().logout_headers().into_response_error()?;
    Ok((headers, Json(json!({ "ok": true }))).into_response())
}

/// Reports whether the caller holds a valid admin session.
pub(super) async fn me(State(auth): State<AdminAuth>, headers: HeaderMap) -> Response {
    if auth.authority().is_authenticated_headers(&headers) {
        Json(json!({ "ok": true, "authed": true })).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "ok": false, "authed": false })),
        )
            .into_response()
    }
}
