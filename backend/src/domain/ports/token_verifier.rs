//! Driven port for checking bearer tokens with the auth platform.

use std::collections::HashMap;

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::auth::{AuthenticatedUser, BearerToken};

define_port_error! {
    /// Errors surfaced while verifying a token.
    pub enum TokenVerifierError {
        /// The platform does not recognise the token, or it has expired.
        Rejected { message: String } =>
            "token rejected: {message}",
        /// The platform could not be reached.
        Transport { message: String } =>
            "auth transport failed: {message}",
        /// The platform answered with a body we could not read.
        Decode { message: String } =>
            "auth response decode failed: {message}",
    }
}

/// Port that turns a bearer token into the user it was issued to.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Resolve `token` to its user.
    async fn verify(&self, token: &BearerToken) -> Result<AuthenticatedUser, TokenVerifierError>;
}

/// Verifier backed by a fixed token table.
#[derive(Debug, Clone, Default)]
pub struct FixtureTokenVerifier {
    users: HashMap<String, AuthenticatedUser>,
}

impl FixtureTokenVerifier {
    /// Accept `token` as belonging to `user`.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.users.insert(token.into(), user);
        self
    }
}

#[async_trait]
impl TokenVerifier for FixtureTokenVerifier {
    async fn verify(&self, token: &BearerToken) -> Result<AuthenticatedUser, TokenVerifierError> {
        self.users
            .get(token.as_str())
            .cloned()
            .ok_or_else(|| TokenVerifierError::rejected("unknown token"))
    }
}
