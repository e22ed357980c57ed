use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use http::HeaderMap;

use crate::session::{config::SessionConfig, errors::SessionError, types::SessionPayload};
use crate::utils::header_set_cookie;

use super::cookie::{extract_named, extract_token_from_headers, format_session_cookie};
use super::events::{SessionEvent, SessionObserver};
use super::token::{check_token, encode_token};

/// Issues and verifies admin session cookies.
///
/// Immutable after construction and cheap to share behind an `Arc`; every
/// call is independent, so concurrent requests need no coordination.
#[derive(Clone)]
pub struct SessionAuthority {
    config: SessionConfig,
    observer: Option<SessionObserver>,
}

impl fmt::Debug for SessionAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionAuthority")
            .field("config", &self.config)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl SessionAuthority {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            observer: None,
        }
    }

    /// Convenience for [`SessionConfig::from_env`] followed by [`SessionAuthority::new`].
    pub fn from_env() -> Result<Self, SessionError> {
        Ok(Self::new(SessionConfig::from_env()?))
    }

    /// Installs a callback that receives every [`SessionEvent`].
    pub fn with_observer<F>(mut self, observer: F) -> Self
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        self.observer = Some(Arc::new(observer));
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn emit(&self, event: SessionEvent) {
        if let Some(observer) = &self.observer {
            observer(&event);
        }
    }

    /// Signs a new admin token.
    pub fn issue_token(&self) -> Result<String, SessionError> {
        let payload = SessionPayload::admin_at(Utc::now());
        let token = encode_token(self.config.secret(), &payload)?;
        self.emit(SessionEvent::Issued {
            issued_at: payload.iat,
        });
        Ok(token)
    }

    /// `Set-Cookie` value to send after a successful login.
    pub fn issue_login_cookie(&self) -> Result<String, SessionError> {
        let token = self.issue_token()?;
        Ok(format_session_cookie(
            self.config.cookie_name(),
            &token,
            self.config.cookie_max_age(),
            self.config.environment(),
        ))
    }

    /// `Set-Cookie` value that clears the session on the client.
    pub fn issue_logout_cookie(&self) -> String {
        self.emit(SessionEvent::Cleared);
        format_session_cookie(self.config.cookie_name(), "", 0, self.config.environment())
    }

    /// Verifies a token already extracted from the request.
    pub fn verify(&self, token: Option<&str>) -> bool {
        match check_token(
            token,
            self.config.secret(),
            self.config.token_max_age(),
            Utc::now(),
        ) {
            Ok(payload) => {
                self.emit(SessionEvent::Verified {
                    issued_at: payload.iat,
                });
                true
            }
            Err(reason) => {
                self.emit(SessionEvent::Rejected(reason));
                false
            }
        }
    }

    /// Checks a raw `Cookie` header value.
    ///
    /// Every failure (no header, no cookie, bad token) is `false`.
    pub fn is_authenticated(&self, cookie_header: Option<&str>) -> bool {
        let token = cookie_header.and_then(|h| extract_named(h, self.config.cookie_name()));
        self.verify(token)
    }

    /// Same as [`SessionAuthority::is_authenticated`] over all `Cookie` headers of a request.
    pub fn is_authenticated_headers(&self, headers: &HeaderMap) -> bool {
        self.verify(extract_token_from_headers(
            headers,
            self.config.cookie_name(),
        ))
    }

    /// Response headers carrying the login cookie.
    pub fn login_headers(&self) -> Result<HeaderMap, SessionError> {
        let cookie = self.issue_login_cookie()?;
        let mut headers = HeaderMap::new();
        header_set_cookie(&mut headers, &cookie)?;
        Ok(headers)
    }

    /// Response headers carrying the logout cookie.
    pub fn logout_headers(&self) -> Result<HeaderMap, SessionError> {
        let cookie = self.issue_logout_cookie();
        let mut headers = HeaderMap::new();
        header_set_cookie(&mut headers, &cookie)?;
        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::config::{Environment, SessionSecret};
    use crate::session::main::events::RejectReason;
    use http::header::{COOKIE, HeaderValue, SET_COOKIE};
    use std::sync::Mutex;
    use std::time::Duration;

    fn authority(secret: &str) -> SessionAuthority {
        SessionAuthority::new(SessionConfig::new(SessionSecret::new(secret).unwrap()))
    }

    fn recording(secret: &str) -> (SessionAuthority, Arc<Mutex<Vec<SessionEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let authority =
            authority(secret).with_observer(move |event| sink.lock().unwrap().push(event.clone()));
        (authority, events)
    }

    /// Token part of a `name=value; attrs` directive
    fn cookie_pair(set_cookie: &str) -> &str {
        set_cookie.split(';').next().unwrap()
    }

    #[test]
    fn test_login_cookie_round_trip() {
        let authority = authority("s3cr3t");
        let set_cookie = authority.issue_login_cookie().unwrap();
        assert!(authority.is_authenticated(Some(cookie_pair(&set_cookie))));
    }

    #[test]
    fn test_scenario_secret_mismatch() {
        let issuer = authority("s3cr3t");
        let other = authority("other");
        let cookie = issuer.issue_login_cookie().unwrap();
        let header = format!("foo=bar; {}", cookie_pair(&cookie));

        assert!(issuer.is_authenticated(Some(&header)));
        assert!(!other.is_authenticated(Some(&header)));
    }

    #[test]
    fn test_missing_and_empty_cookie() {
        let authority = authority("s3cr3t");
        assert!(!authority.is_authenticated(None));
        assert!(!authority.is_authenticated(Some("foo=bar")));
        assert!(!authority.is_authenticated(Some("tattoo_admin_session=")));
    }

    #[test]
    fn test_logout_then_verify_fails() {
        let authority = authority("s3cr3t");
        let first = authority.issue_logout_cookie();
        let second = authority.issue_logout_cookie();
        assert_eq!(first, second);
        assert!(first.contains("Max-Age=0"));

        // Client applies the directive: the cookie is now empty
        assert!(!authority.is_authenticated(Some(cookie_pair(&first))));
    }

    #[test]
    fn test_configured_cookie_name_and_environment() {
        let config = SessionConfig::new(SessionSecret::new("s3cr3t").unwrap())
            .with_cookie_name("custom")
            .unwrap()
            .with_environment(Environment::Production);
        let authority = SessionAuthority::new(config);

        let cookie = authority.issue_login_cookie().unwrap();
        assert!(cookie.starts_with("custom="));
        assert!(cookie.ends_with("; Path=/; HttpOnly; Max-Age=604800; Secure; SameSite=Strict"));
        assert!(authority.is_authenticated(Some(cookie_pair(&cookie))));

        let default_named = cookie_pair(&cookie).replacen("custom=", "tattoo_admin_session=", 1);
        assert!(!authority.is_authenticated(Some(&default_named)));

        assert_eq!(
            authority.issue_logout_cookie(),
            "custom=; Path=/; HttpOnly; Max-Age=0; Secure; SameSite=Strict"
        );
    }

    #[test]
    fn test_token_max_age_applies() {
        let config = SessionConfig::new(SessionSecret::new("s3cr3t").unwrap())
            .with_token_max_age(Duration::from_secs(60));
        let authority = SessionAuthority::new(config);
        let token = authority.issue_token().unwrap();
        assert!(authority.verify(Some(&token)));
    }

    #[test]
    fn test_observer_sees_reasons_caller_does_not() {
        let (authority, events) = recording("s3cr3t");

        let token = authority.issue_token().unwrap();
        assert!(authority.verify(Some(&token)));
        assert!(!authority.verify(None));
        assert!(!authority.verify(Some("garbage")));
        let (base, _) = token.split_once('.').unwrap();
        assert!(!authority.verify(Some(&format!("{base}.short"))));
        authority.issue_logout_cookie();

        let events = events.lock().unwrap();
        assert!(matches!(events[0], SessionEvent::Issued { .. }));
        assert!(matches!(events[1], SessionEvent::Verified { .. }));
        assert_eq!(events[2], SessionEvent::Rejected(RejectReason::MissingToken));
        assert_eq!(events[3], SessionEvent::Rejected(RejectReason::MalformedToken));
        assert_eq!(
            events[4],
            SessionEvent::Rejected(RejectReason::SignatureMismatch)
        );
        assert_eq!(events[5], SessionEvent::Cleared);
    }

    #[test]
    fn test_login_and_logout_headers() {
        let authority = authority("s3cr3t");

        let login = authority.login_headers().unwrap();
        let set_cookie = login.get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(set_cookie.starts_with("tattoo_admin_session="));

        let mut request = HeaderMap::new();
        request.insert(COOKIE, HeaderValue::from_str(cookie_pair(set_cookie)).unwrap());
        assert!(authority.is_authenticated_headers(&request));

        let logout = authority.logout_headers().unwrap();
        assert_eq!(
            logout.get(SET_COOKIE).unwrap(),
            "tattoo_admin_session=; Path=/; HttpOnly; Max-Age=0; SameSite=Lax"
        );
    }

    #[test]
    fn test_authority_is_shareable_across_threads() {
        let authority = Arc::new(authority("s3cr3t"));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let authority = authority.clone();
                std::thread::spawn(move || {
                    let cookie = authority.issue_login_cookie().unwrap();
                    authority.is_authenticated(Some(cookie_pair(&cookie)))
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
