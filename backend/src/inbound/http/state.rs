//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data`, so they depend only
//! on domain services and ports and stay testable without network I/O.

use std::sync::Arc;

use crate::domain::ports::TokenVerifier;
use crate::domain::{BarcodeLookupService, SlidingWindowRateLimiter};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub barcode_lookup: Arc<BarcodeLookupService>,
    /// `None` when the auth platform is not configured; protected endpoints
    /// then answer with an internal error.
    pub token_verifier: Option<Arc<dyn TokenVerifier>>,
    pub rate_limiter: Arc<SlidingWindowRateLimiter>,
}

impl HttpState {
    /// Bundle the services handlers rely on.
    pub fn new(
        barcode_lookup: Arc<BarcodeLookupService>,
        token_verifier: Option<Arc<dyn TokenVerifier>>,
        rate_limiter: Arc<SlidingWindowRateLimiter>,
    ) -> Self {
        Self {
            barcode_lookup,
            token_verifier,
            rate_limiter,
        }
    }
}
