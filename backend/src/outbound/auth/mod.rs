//! Auth platform outbound adapter.

mod http_verifier;

pub use http_verifier::HttpTokenVerifier;
