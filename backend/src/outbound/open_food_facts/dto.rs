//! DTOs for decoding Open Food Facts product responses.

use serde::Deserialize;

use crate::domain::{Barcode, ProductDetails, ProductSource};
use crate::outbound::catalogue_http::non_blank;

/// `status` is `1` when the product exists.
#[derive(Debug, Deserialize)]
pub(super) struct ProductResponseDto {
    #[serde(default)]
    pub(super) status: i64,
    pub(super) product: Option<ProductDto>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ProductDto {
    pub(super) product_name: Option<String>,
    pub(super) generic_name: Option<String>,
    pub(super) brands: Option<String>,
    pub(super) categories: Option<String>,
    pub(super) image_url: Option<String>,
    pub(super) quantity: Option<String>,
}

impl ProductResponseDto {
    /// Products without any usable name count as missing.
    pub(super) fn into_domain(self, barcode: &Barcode) -> Option<ProductDetails> {
        if self.status != 1 {
            return None;
        }
        let product = self.product?;
        let generic_name = non_blank(product.generic_name);
        let name = non_blank(product.product_name).or_else(|| generic_name.clone())?;
        let description = generic_name.filter(|generic| *generic != name);

        Some(ProductDetails {
            barcode: barcode.as_str().to_owned(),
            name,
            brand: first_entry(product.brands),
            category: last_entry(product.categories),
            description,
            image_url: non_blank(product.image_url),
            size: non_blank(product.quantity),
            source: ProductSource::OpenFoodFacts,
        })
    }
}

fn entries(list: Option<String>) -> Vec<String> {
    list.map(|text| {
        text.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_owned)
            .collect()
    })
    .unwrap_or_default()
}

fn first_entry(list: Option<String>) -> Option<String> {
    entries(list).into_iter().next()
}

/// Categories run from broad to specific; the last one is the most useful.
fn last_entry(list: Option<String>) -> Option<String> {
    entries(list).pop()
}
