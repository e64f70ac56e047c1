//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`; the
//! wrappers here mirror their shape and register under the domain names.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Too many requests in the current window.
    #[schema(rename = "rate_limited")]
    RateLimited,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "barcode must contain only digits")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::ProductSource`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ProductSource)]
pub enum ProductSourceSchema {
    #[schema(rename = "open_food_facts")]
    OpenFoodFacts,
    #[schema(rename = "barcode_lookup")]
    BarcodeLookup,
}

/// OpenAPI schema for [`crate::domain::ProductDetails`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ProductDetails)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ProductDetailsSchema {
    #[schema(example = "4006381333931")]
    barcode: String,
    #[schema(example = "Rubber chew toy")]
    name: String,
    brand: Option<String>,
    category: Option<String>,
    description: Option<String>,
    image_url: Option<String>,
    #[schema(example = "250 g")]
    size: Option<String>,
    source: ProductSourceSchema,
}
