//! Authentication primitives: bearer tokens and the signed-in user.
//!
//! Session issuing belongs to the hosted platform. This module only parses
//! what arrives on a request and names who the platform said it belongs to.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier the auth platform assigns to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Wrap a platform user UUID.
    #[must_use]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A user the auth platform vouched for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub email: Option<String>,
}

/// Why an `Authorization` header could not be read as a bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BearerTokenError {
    #[error("missing bearer token")]
    Missing,
    #[error("authorization header must use the Bearer scheme")]
    WrongScheme,
}

/// An opaque access token taken from `Authorization: Bearer <token>`.
///
/// `Debug` never prints the token itself.
///
/// # Examples
/// ```
/// use pawdesk::domain::auth::BearerToken;
///
/// let token = BearerToken::from_header(Some("Bearer abc.def")).expect("bearer token");
/// assert_eq!(token.as_str(), "abc.def");
/// assert!(BearerToken::from_header(Some("Basic dXNlcg==")).is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Parse the raw header value. The scheme is matched case-insensitively.
    pub fn from_header(header: Option<&str>) -> Result<Self, BearerTokenError> {
        let value = header
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(BearerTokenError::Missing)?;
        let (scheme, token) = value
            .split_once(char::is_whitespace)
            .ok_or(BearerTokenError::WrongScheme)?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return Err(BearerTokenError::WrongScheme);
        }
        let token = token.trim();
        if token.is_empty() {
            return Err(BearerTokenError::Missing);
        }
        Ok(Self(token.to_owned()))
    }

    /// The token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(..)")
    }
}
