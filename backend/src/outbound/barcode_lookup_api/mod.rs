//! Barcode Lookup API outbound adapter.
//!
//! The paid fallback catalogue, only wired when an API key is configured.

mod dto;
mod http_source;

pub use http_source::BarcodeLookupApiHttpSource;
