//! Reqwest-backed Barcode Lookup API source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::ProductsResponseDto;
use crate::domain::ports::{ProductCatalogError, ProductCatalogSource};
use crate::domain::{Barcode, ProductDetails};
use crate::outbound::catalogue_http::{
    DEFAULT_USER_AGENT, endpoint, map_status_error, map_transport_error,
};

/// Paid adapter calling `GET {base}/v3/products?barcode=..&key=..`.
pub struct BarcodeLookupApiHttpSource {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl BarcodeLookupApiHttpSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl ProductCatalogSource for BarcodeLookupApiHttpSource {
    fn name(&self) -> &'static str {
        "barcode_lookup"
    }

    async fn lookup(
        &self,
        barcode: &Barcode,
    ) -> Result<Option<ProductDetails>, ProductCatalogError> {
        let url = endpoint(&self.base_url, &["v3", "products"])?;
        let response = self
            .client
            .get(url)
            .query(&[
                ("barcode", barcode.as_str()),
                ("formatted", "y"),
                ("key", self.api_key.as_str()),
            ])
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|error| map_transport_error(error.without_url()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|error| map_transport_error(error.without_url()))?;
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_products(body.as_ref(), barcode)
    }
}

fn parse_products(
    body: &[u8],
    barcode: &Barcode,
) -> Result<Option<ProductDetails>, ProductCatalogError> {
    let decoded: ProductsResponseDto = serde_json::from_slice(body).map_err(|error| {
        ProductCatalogError::decode(format!("invalid Barcode Lookup payload: {error}"))
    })?;
    Ok(decoded.into_domain(barcode))
}
