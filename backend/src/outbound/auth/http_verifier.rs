//! Reqwest-backed token verifier.
//!
//! Resolves a bearer token by asking the hosted auth service who it belongs
//! to (`GET {auth_url}/auth/v1/user`).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::ports::{TokenVerifier, TokenVerifierError};
use crate::domain::{AuthenticatedUser, BearerToken, UserId};
use crate::outbound::catalogue_http::body_preview;

#[derive(Debug, Deserialize)]
struct AuthUserDto {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
}

/// Verifier backed by the hosted auth service's user endpoint.
pub struct HttpTokenVerifier {
    client: Client,
    user_endpoint: Url,
    api_key: String,
}

impl HttpTokenVerifier {
    /// Build a verifier for the auth service rooted at `auth_url`.
    ///
    /// # Errors
    ///
    /// Returns an error when `auth_url` cannot carry a path or when the
    /// reqwest client cannot be constructed.
    pub fn new(
        auth_url: &Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TokenVerifierError> {
        let mut user_endpoint = auth_url.clone();
        user_endpoint
            .path_segments_mut()
            .map_err(|()| TokenVerifierError::transport(format!("{auth_url} cannot be a base URL")))?
            .pop_if_empty()
            .extend(["auth", "v1", "user"]);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| TokenVerifierError::transport(error.to_string()))?;
        Ok(Self {
            client,
            user_endpoint,
            api_key: api_key.into(),
        })
    }

    /// Endpoint consulted for each verification.
    pub fn user_endpoint(&self) -> &Url {
        &self.user_endpoint
    }
}

#[async_trait]
impl TokenVerifier for HttpTokenVerifier {
    async fn verify(&self, token: &BearerToken) -> Result<AuthenticatedUser, TokenVerifierError> {
        let response = self
            .client
            .get(self.user_endpoint.clone())
            .bearer_auth(token.as_str())
            .header("apikey", self.api_key.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|error| TokenVerifierError::transport(error.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|error| TokenVerifierError::transport(error.to_string()))?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_user(body.as_ref())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> TokenVerifierError {
    let message = format!("status {}: {}", status.as_u16(), body_preview(body));
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => TokenVerifierError::rejected(message),
        _ => TokenVerifierError::transport(message),
    }
}

fn parse_user(body: &[u8]) -> Result<AuthenticatedUser, TokenVerifierError> {
    let user: AuthUserDto = serde_json::from_slice(body)
        .map_err(|error| TokenVerifierError::decode(format!("invalid auth user payload: {error}")))?;
    Ok(AuthenticatedUser {
        id: UserId::new(user.id),
        email: user.email,
    })
}
