//! Authentication helpers used by HTTP handlers.
//!
//! Keep the handlers focused on request/response mapping by concentrating
//! bearer token checks here.

use actix_web::HttpRequest;
use actix_web::http::header::AUTHORIZATION;
use tracing::warn;

use crate::domain::ports::{TokenVerifier, TokenVerifierError};
use crate::domain::{AuthenticatedUser, BearerToken, Error};

use super::ApiResult;

/// Verify the request's bearer token against the auth platform.
pub async fn authenticate(
    req: &HttpRequest,
    verifier: &dyn TokenVerifier,
) -> ApiResult<AuthenticatedUser> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let token = BearerToken::from_header(header)
        .map_err(|err| Error::unauthorized(err.to_string()))?;

    verifier.verify(&token).await.map_err(|err| match err {
        TokenVerifierError::Rejected { .. } => Error::unauthorized("invalid or expired token"),
        other => {
            warn!(error = %other, "token verification failed");
            Error::unauthorized("could not verify token")
        }
    })
}
