use std::fmt;
use std::time::Duration;

use crate::session::errors::SessionError;

/// Name of the cookie carrying the admin session token
pub const SESSION_COOKIE_NAME: &str = "tattoo_admin_session";

/// Lifetime of the session cookie in seconds (7 days)
pub const SESSION_COOKIE_MAX_AGE: u64 = 60 * 60 * 24 * 7;

const SECRET_VAR: &str = "ADMIN_SESSION_SECRET";
const ENVIRONMENT_VAR: &str = "APP_ENV";
const COOKIE_NAME_VAR: &str = "ADMIN_SESSION_COOKIE_NAME";
const TOKEN_MAX_AGE_VAR: &str = "ADMIN_SESSION_TOKEN_MAX_AGE";

/// HMAC key used to sign and verify session tokens.
///
/// Always non-empty. The bytes never show up in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionSecret(Vec<u8>);

impl SessionSecret {
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, SessionError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(SessionError::Configuration(format!(
                "{SECRET_VAR} must not be empty"
            )));
        }
        Ok(Self(secret))
    }

    /// Reads the secret from `ADMIN_SESSION_SECRET`.
    pub fn from_env() -> Result<Self, SessionError> {
        Self::from_value(std::env::var(SECRET_VAR).ok())
    }

    fn from_value(value: Option<String>) -> Result<Self, SessionError> {
        match value {
            Some(secret) => Self::new(secret),
            None => Err(SessionError::Configuration(format!(
                "{SECRET_VAR} is not set"
            ))),
        }
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SessionSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionSecret(<redacted>)")
    }
}

/// Deployment environment, which selects the cookie security attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Production,
    #[default]
    Development,
}

impl Environment {
    /// `APP_ENV=production` selects [`Environment::Production`]; anything else,
    /// including an unset variable, is development.
    pub fn from_env() -> Self {
        Self::parse(std::env::var(ENVIRONMENT_VAR).ok().as_deref())
    }

    fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("production") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

/// Everything the session authority needs, injected once at construction.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    secret: SessionSecret,
    environment: Environment,
    cookie_name: String,
    cookie_max_age: u64,
    token_max_age: Option<Duration>,
}

impl SessionConfig {
    pub fn new(secret: SessionSecret) -> Self {
        Self {
            secret,
            environment: Environment::default(),
            cookie_name: SESSION_COOKIE_NAME.to_string(),
            cookie_max_age: SESSION_COOKIE_MAX_AGE,
            token_max_age: None,
        }
    }

    /// Builds the configuration from process environment variables.
    ///
    /// Fails with [`SessionError::Configuration`] when `ADMIN_SESSION_SECRET`
    /// is unset or empty, when `ADMIN_SESSION_COOKIE_NAME` is not a valid
    /// cookie name, or when `ADMIN_SESSION_TOKEN_MAX_AGE` is set but not a
    /// positive number of seconds.
    pub fn from_env() -> Result<Self, SessionError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars<F>(get: F) -> Result<Self, SessionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = SessionSecret::from_value(get(SECRET_VAR))?;
        let mut config = Self::new(secret)
            .with_environment(Environment::parse(get(ENVIRONMENT_VAR).as_deref()));

        if let Some(name) = get(COOKIE_NAME_VAR).filter(|n| !n.trim().is_empty()) {
            config = config.with_cookie_name(name.trim())?;
        }

        if let Some(raw) = get(TOKEN_MAX_AGE_VAR) {
            let secs = parse_max_age(&raw)?;
            config = config.with_token_max_age(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Overrides the session cookie name.
    ///
    /// The name must be an RFC 6265 token, otherwise browsers would send back
    /// a cookie the authority can never match.
    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Result<Self, SessionError> {
        let name = name.into();
        if !is_cookie_token(&name) {
            return Err(SessionError::Configuration(format!(
                "Invalid session cookie name: {name:?}"
            )));
        }
        self.cookie_name = name;
        Ok(self)
    }

    /// Reject tokens whose issuance timestamp is further than `max_age` from
    /// the verification time. Without it only the cookie Max-Age bounds a
    /// session.
    pub fn with_token_max_age(mut self, max_age: Duration) -> Self {
        self.token_max_age = Some(max_age);
        self
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn cookie_max_age(&self) -> u64 {
        self.cookie_max_age
    }

    pub fn token_max_age(&self) -> Option<Duration> {
        self.token_max_age
    }

    pub(crate) fn secret(&self) -> &SessionSecret {
        &self.secret
    }
}

/// `token` from RFC 7230, which RFC 6265 uses for cookie names
fn is_cookie_token(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_alphanumeric()
                || matches!(
                    b,
                    b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' | b'^'
                        | b'_' | b'`' | b'|' | b'~'
                )
        })
}

fn parse_max_age(raw: &str) -> Result<u64, SessionError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(SessionError::Configuration(format!(
            "{TOKEN_MAX_AGE_VAR} must be a positive number of seconds, got {raw:?}"
        ))),
    }
}
