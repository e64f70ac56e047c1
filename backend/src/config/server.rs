//! Server settings parsed from `PAWDESK_*` environment variables.

use std::net::SocketAddr;

use mockable::Env;
use tracing::warn;
use url::Url;

pub(crate) const BIND_ADDR_ENV: &str = "PAWDESK_BIND_ADDR";
pub(crate) const ALLOWED_ORIGINS_ENV: &str = "PAWDESK_ALLOWED_ORIGINS";
pub(crate) const AUTH_URL_ENV: &str = "PAWDESK_AUTH_URL";
pub(crate) const AUTH_API_KEY_ENV: &str = "PAWDESK_AUTH_API_KEY";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Where bearer tokens are verified.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthSettings {
    pub url: Url,
    pub api_key: String,
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("url", &self.url.as_str())
            .field("api_key", &"..")
            .finish()
    }
}

/// Validated server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub bind_addr: SocketAddr,
    /// Browser origins allowed in addition to localhost.
    pub allowed_origins: Vec<String>,
    /// `None` leaves protected endpoints answering 500.
    pub auth: Option<AuthSettings>,
}

/// Errors raised while validating server settings.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ServerConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Build server settings from the environment.
///
/// # Examples
///
/// ```rust
/// use mockable::MockEnv;
/// use pawdesk::config::server_settings_from_env;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "PAWDESK_BIND_ADDR" => Some("127.0.0.1:9000".to_owned()),
///     "PAWDESK_ALLOWED_ORIGINS" => Some("https://app.pawdesk.example".to_owned()),
///     _ => None,
/// });
///
/// let settings = server_settings_from_env(&env).expect("valid settings");
/// assert_eq!(settings.bind_addr.port(), 9000);
/// assert!(settings.auth.is_none());
/// ```
pub fn server_settings_from_env<E: Env>(env: &E) -> Result<ServerSettings, ServerConfigError> {
    Ok(ServerSettings {
        bind_addr: bind_addr_from_env(env)?,
        allowed_origins: allowed_origins_from_env(env),
        auth: auth_from_env(env)?,
    })
}

fn non_empty<E: Env>(env: &E, name: &str) -> Option<String> {
    env.string(name)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn bind_addr_from_env<E: Env>(env: &E) -> Result<SocketAddr, ServerConfigError> {
    let value = non_empty(env, BIND_ADDR_ENV).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
    value.parse().map_err(|_| ServerConfigError::InvalidEnv {
        name: BIND_ADDR_ENV,
        value,
        expected: "host:port socket address",
    })
}

fn allowed_origins_from_env<E: Env>(env: &E) -> Vec<String> {
    non_empty(env, ALLOWED_ORIGINS_ENV)
        .map(|list| {
            list.split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

fn auth_from_env<E: Env>(env: &E) -> Result<Option<AuthSettings>, ServerConfigError> {
    let Some(raw_url) = non_empty(env, AUTH_URL_ENV) else {
        warn!("PAWDESK_AUTH_URL not set; protected endpoints will fail");
        return Ok(None);
    };
    let url = match Url::parse(&raw_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => url,
        _ => {
            return Err(ServerConfigError::InvalidEnv {
                name: AUTH_URL_ENV,
                value: raw_url,
                expected: "absolute http(s) URL",
            });
        }
    };
    let api_key = non_empty(env, AUTH_API_KEY_ENV).ok_or(ServerConfigError::MissingEnv {
        name: AUTH_API_KEY_ENV,
    })?;
    Ok(Some(AuthSettings { url, api_key }))
}
