//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod product_catalog_source;
mod token_verifier;

#[cfg(test)]
pub use product_catalog_source::MockProductCatalogSource;
pub use product_catalog_source::{
    FixtureProductCatalogSource, ProductCatalogError, ProductCatalogSource,
};
#[cfg(test)]
pub use token_verifier::MockTokenVerifier;
pub use token_verifier::{FixtureTokenVerifier, TokenVerifier, TokenVerifierError};
