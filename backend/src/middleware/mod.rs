//! Actix middleware shared by every route.

pub mod cors;
pub mod trace;

pub use cors::{Cors, CorsPolicy};
pub use trace::Trace;
