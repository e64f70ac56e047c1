//! Outbound adapters implementing domain ports for external services.
//!
//! - **open_food_facts**: primary product catalogue
//! - **barcode_lookup_api**: paid fallback catalogue
//! - **auth**: bearer token verification against the hosted auth service
//!
//! Adapters are thin translators between domain types and provider payloads.
//! They contain no business logic.

pub mod auth;
pub mod barcode_lookup_api;
pub(crate) mod catalogue_http;
pub mod open_food_facts;
