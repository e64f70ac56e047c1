//! Open Food Facts outbound adapter.
//!
//! The free primary catalogue behind barcode lookups.

mod dto;
mod http_source;

pub use http_source::OpenFoodFactsHttpSource;
