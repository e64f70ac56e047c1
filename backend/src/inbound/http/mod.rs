//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod barcode;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;

pub use error::ApiResult;

use actix_web::{Scope, web};

/// Versioned API routes. Methods other than those registered answer 405.
pub fn api_scope() -> Scope {
    web::scope("/api/v1").service(
        web::resource("/barcode-lookup").route(web::post().to(barcode::lookup_barcode)),
    )
}
