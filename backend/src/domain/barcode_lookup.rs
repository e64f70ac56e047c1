//! Barcode lookup across a primary catalogue and an optional paid fallback.
//!
//! Provider failures never reach the caller. Each failure or timeout is
//! logged and treated as "not found", so the caller only ever learns whether
//! a product turned up.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::barcode::{Barcode, ProductDetails};
use super::deadline::with_deadline;
use super::ports::ProductCatalogSource;

/// Per-provider deadline used when none is configured.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(5);

/// Looks a barcode up in the primary catalogue, then the fallback.
#[derive(Clone)]
pub struct BarcodeLookupService {
    primary: Arc<dyn ProductCatalogSource>,
    fallback: Option<Arc<dyn ProductCatalogSource>>,
    timeout: Duration,
}

impl BarcodeLookupService {
    /// Create a service that only consults `primary`.
    pub fn new(primary: Arc<dyn ProductCatalogSource>) -> Self {
        Self {
            primary,
            fallback: None,
            timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }

    /// Consult `fallback` when the primary catalogue has nothing.
    #[must_use]
    pub fn with_fallback(mut self, fallback: Arc<dyn ProductCatalogSource>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Bound each provider call by `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// True when a fallback catalogue is configured.
    #[must_use]
    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Find product details for `barcode`.
    pub async fn lookup(&self, barcode: &Barcode) -> Option<ProductDetails> {
        if let Some(product) = self.query(self.primary.as_ref(), barcode).await {
            return Some(product);
        }
        match self.fallback.as_deref() {
            Some(fallback) => self.query(fallback, barcode).await,
            None => None,
        }
    }

    async fn query(
        &self,
        source: &dyn ProductCatalogSource,
        barcode: &Barcode,
    ) -> Option<ProductDetails> {
        let provider = source.name();
        match with_deadline(self.timeout, source.lookup(barcode)).await {
            Ok(Ok(Some(product))) => {
                info!(provider, barcode = %barcode, "product found");
                Some(product)
            }
            Ok(Ok(None)) => {
                debug!(provider, barcode = %barcode, "product not found");
                None
            }
            Ok(Err(error)) => {
                warn!(provider, barcode = %barcode, error = %error, "product lookup failed");
                None
            }
            Err(error) => {
                warn!(provider, barcode = %barcode, error = %error, "product lookup timed out");
                None
            }
        }
    }
}
