//! End-to-end checks of the public session API: a browser logs in, sends the
//! cookie back, tampers with it, and logs out.

use std::sync::{Arc, Mutex};

use admin_session::{
    Environment, RejectReason, SESSION_COOKIE_NAME, SessionAuthority, SessionConfig,
    SessionEvent, SessionSecret, expire_cookie, extract_token, frame_cookie, issue_token,
    verify_token,
};

/// Minimal cookie jar: applies `Set-Cookie` directives and renders a `Cookie` header
#[derive(Default)]
struct Jar {
    cookies: Vec<(String, String)>,
}

impl Jar {
    fn apply(&mut self, set_cookie: &str) {
        let pair = set_cookie.split(';').next().unwrap();
        let (name, value) = pair.split_once('=').unwrap();
        let expired = set_cookie
            .split(';')
            .any(|attr| attr.trim() == "Max-Age=0");
        self.cookies.retain(|(n, _)| n != name);
        if !expired {
            self.cookies.push((name.to_string(), value.to_string()));
        }
    }

    fn header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        Some(
            self.cookies
                .iter()
                .map(|(n, v)| format!("{n}={v}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

fn authority(secret: &str, environment: Environment) -> SessionAuthority {
    SessionAuthority::new(
        SessionConfig::new(SessionSecret::new(secret).unwrap()).with_environment(environment),
    )
}

#[test]
fn login_request_logout_cycle() {
    let authority = authority("s3cr3t", Environment::Production);
    let mut jar = Jar::default();
    jar.apply("theme=dark; Path=/");

    assert!(!authority.is_authenticated(jar.header().as_deref()));

    jar.apply(&authority.issue_login_cookie().unwrap());
    assert!(authority.is_authenticated(jar.header().as_deref()));

    jar.apply(&authority.issue_logout_cookie());
    assert!(!authority.is_authenticated(jar.header().as_deref()));
    assert_eq!(jar.header().as_deref(), Some("theme=dark"));
}

#[test]
fn free_functions_match_the_wire_format() {
    let secret = SessionSecret::new("s3cr3t").unwrap();
    let token = issue_token(&secret).unwrap();

    let set_cookie = frame_cookie(&token, Environment::Development);
    assert_eq!(
        set_cookie,
        format!("{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; Max-Age=604800; SameSite=Lax")
    );

    let header = format!("foo=bar; {}", set_cookie.split(';').next().unwrap());
    let extracted = extract_token(Some(&header));
    assert_eq!(extracted, Some(token.as_str()));
    assert!(verify_token(extracted, &secret));
    assert!(!verify_token(extracted, &SessionSecret::new("other").unwrap()));

    assert_eq!(
        expire_cookie(Environment::Development),
        format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; Max-Age=0; SameSite=Lax")
    );
}

#[test]
fn empty_cookie_value_fails_closed() {
    let secret = SessionSecret::new("s3cr3t").unwrap();
    let extracted = extract_token(Some("tattoo_admin_session="));
    assert_eq!(extracted, Some(""));
    assert!(!verify_token(extracted, &secret));
}

#[test]
fn rejections_are_indistinguishable_to_callers() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    let authority = authority("s3cr3t", Environment::Development)
        .with_observer(move |event| sink.lock().unwrap().push(event.clone()));

    let token = authority.issue_token().unwrap();
    let (base, signature) = token.split_once('.').unwrap();
    let mut flipped = signature.to_string().into_bytes();
    flipped[0] = if flipped[0] == b'A' { b'B' } else { b'A' };
    let flipped = String::from_utf8(flipped).unwrap();

    let attempts = [
        None,
        Some("nodots".to_string()),
        Some(format!("{base}.{flipped}")),
        Some(format!("{base}.{signature}x")),
    ];
    for attempt in &attempts {
        assert!(!authority.verify(attempt.as_deref()));
    }

    let reasons: Vec<RejectReason> = events
        .lock()
        .unwrap()
        .iter()
        .filter_map(|e| match e {
            SessionEvent::Rejected(reason) => Some(*reason),
            _ => None,
        })
        .collect();
    assert_eq!(
        reasons,
        vec![
            RejectReason::MissingToken,
            RejectReason::MalformedToken,
            RejectReason::SignatureMismatch,
            RejectReason::SignatureMismatch,
        ]
    );
}

#[test]
fn missing_secret_is_a_configuration_error() {
    let err = SessionSecret::new(Vec::new()).unwrap_err();
    assert!(matches!(err, admin_session::SessionError::Configuration(_)));
}
