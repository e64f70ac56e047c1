//! Transport helpers shared by the reqwest-backed catalogue adapters.

use reqwest::{StatusCode, Url};

use crate::domain::ports::ProductCatalogError;

pub(crate) const DEFAULT_USER_AGENT: &str = "pawdesk-barcode-lookup/0.1";

/// Append `segments` to the path of `base`, keeping any path prefix it has.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, ProductCatalogError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| ProductCatalogError::transport(format!("{base} cannot be a base URL")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

pub(crate) fn map_transport_error(error: reqwest::Error) -> ProductCatalogError {
    if error.is_timeout() {
        ProductCatalogError::timeout(error.to_string())
    } else {
        ProductCatalogError::transport(error.to_string())
    }
}

pub(crate) fn map_status_error(status: StatusCode, body: &[u8]) -> ProductCatalogError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS => ProductCatalogError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            ProductCatalogError::timeout(message)
        }
        _ => ProductCatalogError::upstream(status.as_u16(), message),
    }
}

pub(crate) fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

/// Trimmed, non-empty text or `None`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://world.openfoodfacts.org", "https://world.openfoodfacts.org/api/v2/product/1.json")]
    #[case("https://proxy.example/off/", "https://proxy.example/off/api/v2/product/1.json")]
    fn endpoint_keeps_base_path(#[case] base: &str, #[case] expected: &str) {
        let base = Url::parse(base).expect("url");
        let url = endpoint(&base, &["api", "v2", "product", "1.json"]).expect("endpoint");
        assert_eq!(url.as_str(), expected);
    }

    #[rstest]
    #[case::rate_limited(StatusCode::TOO_MANY_REQUESTS)]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT)]
    #[case::server_error(StatusCode::BAD_GATEWAY)]
    fn maps_statuses(#[case] status: StatusCode) {
        let error = map_status_error(status, b"{\"status\": \"down\"}");
        match status {
            StatusCode::TOO_MANY_REQUESTS => {
                assert!(matches!(error, ProductCatalogError::RateLimited { .. }));
            }
            StatusCode::GATEWAY_TIMEOUT => {
                assert!(matches!(error, ProductCatalogError::Timeout { .. }));
            }
            _ => assert_eq!(
                error,
                ProductCatalogError::upstream(502_u16, "status 502: {\"status\": \"down\"}")
            ),
        }
    }

    #[rstest]
    fn preview_truncates_long_bodies() {
        let body = "x ".repeat(200);
        let preview = body_preview(body.as_bytes());
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 163);
    }

    #[rstest]
    #[case(Some("  Kong  "), Some("Kong"))]
    #[case(Some("   "), None)]
    #[case(None, None)]
    fn non_blank_trims(#[case] input: Option<&str>, #[case] expected: Option<&str>) {
        assert_eq!(
            non_blank(input.map(str::to_owned)),
            expected.map(str::to_owned)
        );
    }
}
