//! Reqwest-backed Open Food Facts source.
//!
//! Owns transport details only: URL construction, status mapping and JSON
//! decoding into [`ProductDetails`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::ProductResponseDto;
use crate::domain::ports::{ProductCatalogError, ProductCatalogSource};
use crate::domain::{Barcode, ProductDetails};
use crate::outbound::catalogue_http::{
    DEFAULT_USER_AGENT, endpoint, map_status_error, map_transport_error,
};

const FIELDS: &str = "product_name,generic_name,brands,categories,image_url,quantity";

/// Open Food Facts adapter calling `GET {base}/api/v2/product/{barcode}.json`.
pub struct OpenFoodFactsHttpSource {
    client: Client,
    base_url: Url,
}

impl OpenFoodFactsHttpSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl ProductCatalogSource for OpenFoodFactsHttpSource {
    fn name(&self) -> &'static str {
        "open_food_facts"
    }

    async fn lookup(
        &self,
        barcode: &Barcode,
    ) -> Result<Option<ProductDetails>, ProductCatalogError> {
        let file = format!("{}.json", barcode.as_str());
        let url = endpoint(&self.base_url, &["api", "v2", "product", file.as_str()])?;
        let response = self
            .client
            .get(url)
            .query(&[("fields", FIELDS)])
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        // v2 answers unknown barcodes with 404 and a `status: 0` body.
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_product(body.as_ref(), barcode)
    }
}

fn parse_product(
    body: &[u8],
    barcode: &Barcode,
) -> Result<Option<ProductDetails>, ProductCatalogError> {
    let decoded: ProductResponseDto = serde_json::from_slice(body).map_err(|error| {
        ProductCatalogError::decode(format!("invalid Open Food Facts payload: {error}"))
    })?;
    Ok(decoded.into_domain(barcode))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network Open Food Facts mapping.

    use super::*;
    use crate::domain::ProductSource;
    use rstest::{fixture, rstest};

    #[fixture]
    fn barcode() -> Barcode {
        Barcode::parse("3017620422003").expect("barcode")
    }

    #[rstest]
    fn parses_found_product(barcode: Barcode) {
        let body = r#"{
            "code": "3017620422003",
            "status": 1,
            "product": {
                "product_name": "Salmon Bites",
                "generic_name": "Dog treats",
                "brands": "Good Boy, Good Boy Co",
                "categories": "Pet foods, Dog foods, Dog treats",
                "image_url": "https://images.openfoodfacts.org/3017620422003.jpg",
                "quantity": "200 g"
            }
        }"#;

        let product = parse_product(body.as_bytes(), &barcode)
            .expect("decodes")
            .expect("found");
        assert_eq!(product.barcode, "3017620422003");
        assert_eq!(product.name, "Salmon Bites");
        assert_eq!(product.brand.as_deref(), Some("Good Boy"));
        assert_eq!(product.category.as_deref(), Some("Dog treats"));
        assert_eq!(product.description.as_deref(), Some("Dog treats"));
        assert_eq!(product.size.as_deref(), Some("200 g"));
        assert_eq!(product.source, ProductSource::OpenFoodFacts);
    }

    #[rstest]
    #[case::status_zero(r#"{"status": 0, "status_verbose": "product not found"}"#)]
    #[case::nameless(r#"{"status": 1, "product": {"brands": "Acme", "product_name": " "}}"#)]
    fn missing_products_are_none(barcode: Barcode, #[case] body: &str) {
        assert_eq!(parse_product(body.as_bytes(), &barcode), Ok(None));
    }

    #[rstest]
    fn generic_name_stands_in_for_missing_product_name(barcode: Barcode) {
        let body = r#"{"status": 1, "product": {"generic_name": "Cat litter"}}"#;
        let product = parse_product(body.as_bytes(), &barcode)
            .expect("decodes")
            .expect("found");
        assert_eq!(product.name, "Cat litter");
        assert_eq!(product.description, None);
    }

    #[rstest]
    fn malformed_json_is_a_decode_error(barcode: Barcode) {
        let error = parse_product(b"<html>", &barcode).expect_err("decode fails");
        assert!(matches!(error, ProductCatalogError::Decode { .. }));
    }
}
