//! Builders for HTTP adapter state backed by in-memory fixtures.

use std::sync::Arc;

use actix_web::http::header::{AUTHORIZATION, HeaderName};
use mockable::{Clock, DefaultClock};
use uuid::Uuid;

use crate::domain::ports::{FixtureTokenVerifier, ProductCatalogSource, TokenVerifier};
use crate::domain::rate_limit::DEFAULT_REQUESTS_PER_WINDOW;
use crate::domain::{
    AuthenticatedUser, BarcodeLookupService, SlidingWindowRateLimiter, UserId,
};
use crate::domain::ports::FixtureProductCatalogSource;
use crate::inbound::http::state::HttpState;

/// Token accepted by the default fixture verifier.
pub const TEST_TOKEN: &str = "front-desk-token";

/// The user [`TEST_TOKEN`] belongs to.
pub fn test_user() -> AuthenticatedUser {
    AuthenticatedUser {
        id: UserId::new(Uuid::from_u128(0x5eed)),
        email: Some("front-desk@pawdesk.example".to_owned()),
    }
}

/// `Authorization` header carrying `token`.
pub fn bearer(token: &str) -> (HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {token}"))
}

/// Builder for [`HttpState`] with fixture ports.
///
/// # Examples
/// ```
/// use pawdesk::test_support::http::TestHttpState;
///
/// let state = TestHttpState::default().with_rate_limit(5).build();
/// assert_eq!(state.rate_limiter.limit(), 5);
/// ```
pub struct TestHttpState {
    primary: Arc<dyn ProductCatalogSource>,
    fallback: Option<Arc<dyn ProductCatalogSource>>,
    verifier: Option<Arc<dyn TokenVerifier>>,
    clock: Arc<dyn Clock>,
    rate_limit: usize,
}

impl Default for TestHttpState {
    fn default() -> Self {
        Self {
            primary: Arc::new(FixtureProductCatalogSource::default()),
            fallback: None,
            verifier: Some(Arc::new(
                FixtureTokenVerifier::default().with_token(TEST_TOKEN, test_user()),
            )),
            clock: Arc::new(DefaultClock),
            rate_limit: DEFAULT_REQUESTS_PER_WINDOW,
        }
    }
}

impl TestHttpState {
    #[must_use]
    pub fn with_primary(mut self, source: impl ProductCatalogSource + 'static) -> Self {
        self.primary = Arc::new(source);
        self
    }

    #[must_use]
    pub fn with_fallback(mut self, source: impl ProductCatalogSource + 'static) -> Self {
        self.fallback = Some(Arc::new(source));
        self
    }

    /// Leave the auth service unconfigured.
    #[must_use]
    pub fn without_auth(mut self) -> Self {
        self.verifier = None;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_rate_limit(mut self, limit: usize) -> Self {
        self.rate_limit = limit;
        self
    }

    pub fn build(self) -> HttpState {
        let mut lookup = BarcodeLookupService::new(self.primary);
        if let Some(fallback) = self.fallback {
            lookup = lookup.with_fallback(fallback);
        }
        HttpState::new(
            Arc::new(lookup),
            self.verifier,
            Arc::new(SlidingWindowRateLimiter::per_minute(self.clock, self.rate_limit)),
        )
    }
}
