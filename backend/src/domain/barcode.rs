//! Retail barcodes and the product details looked up for them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Longest raw input accepted before digit checks run.
pub const MAX_BARCODE_INPUT_LEN: usize = 20;

/// Digit counts of EAN-8, UPC-A, EAN-13 and GTIN-14.
pub const BARCODE_LENGTHS: [usize; 4] = [8, 12, 13, 14];

/// Why a barcode was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BarcodeError {
    #[error("barcode is required")]
    Missing,
    #[error("barcode must be at most 20 characters")]
    TooLong,
    #[error("barcode must contain only digits")]
    NotNumeric,
    #[error("barcode must be 8, 12, 13 or 14 digits (got {length})")]
    InvalidLength { length: usize },
}

/// Symbology implied by the digit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BarcodeFormat {
    #[serde(rename = "EAN-8")]
    Ean8,
    #[serde(rename = "UPC-A")]
    UpcA,
    #[serde(rename = "EAN-13")]
    Ean13,
    #[serde(rename = "GTIN-14")]
    Gtin14,
}

/// A validated numeric barcode.
///
/// # Examples
/// ```
/// use pawdesk::domain::barcode::{Barcode, BarcodeError, BarcodeFormat};
///
/// let barcode = Barcode::parse(" 012345678905 ").expect("UPC-A");
/// assert_eq!(barcode.as_str(), "012345678905");
/// assert_eq!(barcode.format(), BarcodeFormat::UpcA);
/// assert_eq!(
///     Barcode::parse("123456789"),
///     Err(BarcodeError::InvalidLength { length: 9 })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Barcode(String);

impl Barcode {
    /// Trim and validate raw input.
    pub fn parse(raw: &str) -> Result<Self, BarcodeError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BarcodeError::Missing);
        }
        if trimmed.len() > MAX_BARCODE_INPUT_LEN {
            return Err(BarcodeError::TooLong);
        }
        if !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(BarcodeError::NotNumeric);
        }
        if !BARCODE_LENGTHS.contains(&trimmed.len()) {
            return Err(BarcodeError::InvalidLength {
                length: trimmed.len(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// The digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Symbology for this length.
    #[must_use]
    pub fn format(&self) -> BarcodeFormat {
        match self.0.len() {
            8 => BarcodeFormat::Ean8,
            12 => BarcodeFormat::UpcA,
            13 => BarcodeFormat::Ean13,
            _ => BarcodeFormat::Gtin14,
        }
    }
}

impl fmt::Display for Barcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for Barcode {
    type Error = BarcodeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// Upstream catalogue that supplied a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSource {
    OpenFoodFacts,
    BarcodeLookup,
}

/// Product details used to pre-fill the inventory form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetails {
    pub barcode: String,
    pub name: String,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub size: Option<String>,
    pub source: ProductSource,
}
