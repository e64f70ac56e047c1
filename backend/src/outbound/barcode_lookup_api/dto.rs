//! DTOs for decoding Barcode Lookup API responses.

use serde::Deserialize;

use crate::domain::{Barcode, ProductDetails, ProductSource};
use crate::outbound::catalogue_http::non_blank;

#[derive(Debug, Deserialize)]
pub(super) struct ProductsResponseDto {
    #[serde(default)]
    pub(super) products: Vec<ProductDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProductDto {
    pub(super) title: Option<String>,
    pub(super) brand: Option<String>,
    pub(super) manufacturer: Option<String>,
    pub(super) category: Option<String>,
    pub(super) description: Option<String>,
    pub(super) size: Option<String>,
    #[serde(default)]
    pub(super) images: Vec<String>,
}

impl ProductsResponseDto {
    pub(super) fn into_domain(self, barcode: &Barcode) -> Option<ProductDetails> {
        let product = self.products.into_iter().next()?;
        let name = non_blank(product.title)?;

        Some(ProductDetails {
            barcode: barcode.as_str().to_owned(),
            name,
            brand: non_blank(product.brand).or_else(|| non_blank(product.manufacturer)),
            // Categories arrive as "A > B > C"; keep the leaf.
            category: non_blank(product.category).and_then(|path| {
                path.rsplit('>')
                    .map(str::trim)
                    .find(|segment| !segment.is_empty())
                    .map(str::to_owned)
            }),
            description: non_blank(product.description),
            image_url: product.images.into_iter().find_map(|url| non_blank(Some(url))),
            size: non_blank(product.size),
            source: ProductSource::BarcodeLookup,
        })
    }
}
