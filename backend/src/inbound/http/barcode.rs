//! Barcode lookup endpoint used by the inventory scanner.
//!
//! ```text
//! POST /api/v1/barcode-lookup {"barcode":"4006381333931"}
//! ```

use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::domain::{Barcode, Error, ProductDetails, RateLimitDecision};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::authenticate;
use crate::inbound::http::schemas::{ErrorSchema, ProductDetailsSchema};
use crate::inbound::http::state::HttpState;

/// Request body carrying the scanned code.
#[derive(Debug, Deserialize, ToSchema)]
pub struct BarcodeLookupRequest {
    #[serde(default)]
    #[schema(example = "4006381333931")]
    pub barcode: Option<String>,
}

/// Lookup outcome. `product` is omitted when nothing matched.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BarcodeLookupResponse {
    pub found: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<ProductDetailsSchema>)]
    pub product: Option<ProductDetails>,
}

impl From<Option<ProductDetails>> for BarcodeLookupResponse {
    fn from(product: Option<ProductDetails>) -> Self {
        Self {
            found: product.is_some(),
            product,
        }
    }
}

fn parse_request(body: &[u8]) -> ApiResult<Barcode> {
    let request: BarcodeLookupRequest = serde_json::from_slice(body).map_err(|err| {
        debug!(error = %err, "rejecting unreadable barcode lookup body");
        Error::invalid_request("request body must be a JSON object with a barcode string")
    })?;
    Barcode::parse(request.barcode.as_deref().unwrap_or_default())
        .map_err(|err| Error::invalid_request(err.to_string()))
}

/// Look up product details for a scanned barcode.
#[utoipa::path(
    post,
    path = "/api/v1/barcode-lookup",
    description = "Resolve a scanned EAN/UPC/GTIN barcode to product details. Upstream failures are reported as not found.",
    request_body = BarcodeLookupRequest,
    responses(
        (status = 200, description = "Lookup outcome", body = BarcodeLookupResponse),
        (status = 400, description = "Invalid body or barcode", body = ErrorSchema),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (
            status = 429,
            description = "Too many lookups",
            headers(("Retry-After" = String, description = "Seconds until the next lookup is accepted")),
            body = ErrorSchema
        ),
        (status = 500, description = "Authentication is not configured", body = ErrorSchema)
    ),
    tags = ["inventory"],
    operation_id = "lookupBarcode",
    security(("BearerAuth" = []))
)]
pub async fn lookup_barcode(
    req: HttpRequest,
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let Some(verifier) = state.token_verifier.as_deref() else {
        error!("barcode lookup called without an auth service configured");
        return Err(Error::internal("auth service is not configured"));
    };
    let user = authenticate(&req, verifier).await?;

    if let RateLimitDecision::Limited { retry_after } = state.rate_limiter.check(user.id) {
        debug!(user = %user.id, "barcode lookup rate limited");
        return Err(Error::rate_limited(
            "too many barcode lookups, try again later",
            retry_after,
        ));
    }

    let barcode = parse_request(&body)?;
    let product = state.barcode_lookup.lookup(&barcode).await;
    Ok(HttpResponse::Ok().json(BarcodeLookupResponse::from(product)))
}
