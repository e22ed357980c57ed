use http::header::{COOKIE, HeaderMap};

use crate::session::config::{Environment, SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME};

fn security_attributes(environment: Environment) -> &'static str {
    match environment {
        Environment::Production => "; Secure; SameSite=Strict",
        Environment::Development => "; SameSite=Lax",
    }
}

pub(super) fn format_session_cookie(
    name: &str,
    value: &str,
    max_age: u64,
    environment: Environment,
) -> String {
    format!(
        "{name}={value}; Path=/; HttpOnly; Max-Age={max_age}{}",
        security_attributes(environment)
    )
}

/// `Set-Cookie` directive carrying `token` in the default session cookie.
pub fn frame_cookie(token: &str, environment: Environment) -> String {
    format_session_cookie(SESSION_COOKIE_NAME, token, SESSION_COOKIE_MAX_AGE, environment)
}

/// `Set-Cookie` directive that clears the default session cookie.
pub fn expire_cookie(environment: Environment) -> String {
    format_session_cookie(SESSION_COOKIE_NAME, "", 0, environment)
}

/// Pulls the session token out of a raw `Cookie` header value.
///
/// Purely syntactic: the value is returned as-is, without decoding or
/// checking its structure. The first cookie with exactly the session cookie
/// name wins.
pub fn extract_token(cookie_header: Option<&str>) -> Option<&str> {
    extract_named(cookie_header?, SESSION_COOKIE_NAME)
}

pub(super) fn extract_named<'a>(cookie_header: &'a str, cookie_name: &str) -> Option<&'a str> {
    cookie_header.split(';').map(|s| s.trim()).find_map(|s| {
        let mut parts = s.splitn(2, '=');
        match (parts.next(), parts.next()) {
            (Some(k), Some(v)) if k == cookie_name => Some(v),
            _ => None,
        }
    })
}

/// Looks for `cookie_name` across every `Cookie` header in `headers`.
///
/// Header values that are not visible ASCII are skipped.
pub fn extract_token_from_headers<'a>(headers: &'a HeaderMap, cookie_name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| match value.to_str() {
            Ok(s) => Some(s),
            Err(e) => {
                tracing::debug!("Skipping unreadable cookie header: {e}");
                None
            }
        })
        .find_map(|s| extract_named(s, cookie_name))
}
