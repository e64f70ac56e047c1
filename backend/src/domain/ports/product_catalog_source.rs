//! Driven port for upstream product catalogues keyed by barcode.
//!
//! Adapters translate one provider's response into [`ProductDetails`]. A
//! provider that has no record for the barcode answers `Ok(None)`; errors are
//! reserved for calls that failed.

use std::collections::HashMap;

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::barcode::{Barcode, ProductDetails};

define_port_error! {
    /// Errors surfaced while calling a product catalogue.
    pub enum ProductCatalogError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "catalogue transport failed: {message}",
        /// The call exceeded its deadline.
        Timeout { message: String } =>
            "catalogue timeout: {message}",
        /// The provider throttled the request.
        RateLimited { message: String } =>
            "catalogue rate limited request: {message}",
        /// The provider answered with an unexpected status.
        Upstream { status: u16, message: String } =>
            "catalogue returned status {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "catalogue response decode failed: {message}",
    }
}

/// Port for looking a barcode up in one catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductCatalogSource: Send + Sync {
    /// Short provider name used in logs.
    fn name(&self) -> &'static str;

    /// Fetch product details, or `None` when the catalogue has no match.
    async fn lookup(&self, barcode: &Barcode) -> Result<Option<ProductDetails>, ProductCatalogError>;
}

/// In-memory catalogue for tests and local runs.
#[derive(Debug, Clone, Default)]
pub struct FixtureProductCatalogSource {
    products: HashMap<Barcode, ProductDetails>,
}

impl FixtureProductCatalogSource {
    /// Add a product keyed by its barcode.
    #[must_use]
    pub fn with_product(mut self, barcode: Barcode, product: ProductDetails) -> Self {
        self.products.insert(barcode, product);
        self
    }
}

#[async_trait]
impl ProductCatalogSource for FixtureProductCatalogSource {
    fn name(&self) -> &'static str {
        "fixture"
    }

    async fn lookup(&self, barcode: &Barcode) -> Result<Option<ProductDetails>, ProductCatalogError> {
        Ok(self.products.get(barcode).cloned())
    }
}
