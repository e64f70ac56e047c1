//! Catalogue settings loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::barcode_lookup::DEFAULT_PROVIDER_TIMEOUT;
use crate::domain::rate_limit::DEFAULT_REQUESTS_PER_WINDOW;

const DEFAULT_OPEN_FOOD_FACTS_URL: &str = "https://world.openfoodfacts.org";
const DEFAULT_PAID_API_URL: &str = "https://api.barcodelookup.com";

/// Configuration for upstream catalogues and the lookup rate limit.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BARCODE_LOOKUP")]
pub struct BarcodeLookupSettings {
    /// Base URL of the free primary catalogue.
    pub open_food_facts_url: Option<String>,
    /// Base URL of the paid fallback catalogue.
    pub paid_api_url: Option<String>,
    /// API key enabling the paid fallback.
    pub paid_api_key: Option<String>,
    /// Per-provider request deadline in milliseconds.
    #[ortho_config(default = 5000)]
    pub timeout_ms: u64,
    /// Lookups allowed per user per minute.
    #[ortho_config(default = 60)]
    pub rate_limit_per_minute: usize,
}

impl std::fmt::Debug for BarcodeLookupSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BarcodeLookupSettings")
            .field("open_food_facts_url", &self.open_food_facts_url)
            .field("paid_api_url", &self.paid_api_url)
            .field("paid_api_key", &self.paid_api_key.as_ref().map(|_| ".."))
            .field("timeout_ms", &self.timeout_ms)
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .finish()
    }
}

impl BarcodeLookupSettings {
    /// Primary catalogue base URL, falling back to the public instance.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured value is not a URL.
    pub fn open_food_facts_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(
            self.open_food_facts_url
                .as_deref()
                .unwrap_or(DEFAULT_OPEN_FOOD_FACTS_URL),
        )
    }

    /// Paid catalogue base URL, falling back to the public endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured value is not a URL.
    pub fn paid_api_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(self.paid_api_url.as_deref().unwrap_or(DEFAULT_PAID_API_URL))
    }

    /// Key for the paid fallback, if one is configured and non-blank.
    pub fn paid_api_key(&self) -> Option<&str> {
        self.paid_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Per-provider deadline; zero falls back to the default.
    pub fn timeout(&self) -> Duration {
        if self.timeout_ms == 0 {
            DEFAULT_PROVIDER_TIMEOUT
        } else {
            Duration::from_millis(self.timeout_ms)
        }
    }

    /// Lookups per user per minute; zero falls back to the default.
    pub fn rate_limit_per_minute(&self) -> usize {
        if self.rate_limit_per_minute == 0 {
            DEFAULT_REQUESTS_PER_WINDOW
        } else {
            self.rate_limit_per_minute
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for catalogue configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "BARCODE_LOOKUP_OPEN_FOOD_FACTS_URL",
        "BARCODE_LOOKUP_PAID_API_URL",
        "BARCODE_LOOKUP_PAID_API_KEY",
        "BARCODE_LOOKUP_TIMEOUT_MS",
        "BARCODE_LOOKUP_RATE_LIMIT_PER_MINUTE",
    ];

    fn load_from_empty_args() -> BarcodeLookupSettings {
        BarcodeLookupSettings::load_from_iter([OsString::from("pawdesk")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.open_food_facts_url().expect("url").as_str(),
            "https://world.openfoodfacts.org/"
        );
        assert_eq!(settings.paid_api_key(), None);
        assert_eq!(settings.timeout(), DEFAULT_PROVIDER_TIMEOUT);
        assert_eq!(settings.rate_limit_per_minute(), 60);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "BARCODE_LOOKUP_OPEN_FOOD_FACTS_URL",
                Some("http://localhost:9100".to_owned()),
            ),
            ("BARCODE_LOOKUP_PAID_API_URL", None),
            ("BARCODE_LOOKUP_PAID_API_KEY", Some("secret-key".to_owned())),
            ("BARCODE_LOOKUP_TIMEOUT_MS", Some("1500".to_owned())),
            ("BARCODE_LOOKUP_RATE_LIMIT_PER_MINUTE", Some("5".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.open_food_facts_url().expect("url").as_str(),
            "http://localhost:9100/"
        );
        assert_eq!(settings.paid_api_key(), Some("secret-key"));
        assert_eq!(settings.timeout(), Duration::from_millis(1500));
        assert_eq!(settings.rate_limit_per_minute(), 5);
        assert!(!format!("{settings:?}").contains("secret-key"));
    }

    #[rstest]
    #[case(0, DEFAULT_PROVIDER_TIMEOUT)]
    #[case(250, Duration::from_millis(250))]
    fn zero_timeout_falls_back_to_default(#[case] timeout_ms: u64, #[case] expected: Duration) {
        let settings = BarcodeLookupSettings {
            open_food_facts_url: None,
            paid_api_url: None,
            paid_api_key: Some("  ".to_owned()),
            timeout_ms,
            rate_limit_per_minute: 0,
        };
        assert_eq!(settings.timeout(), expected);
        assert_eq!(settings.paid_api_key(), None);
        assert_eq!(settings.rate_limit_per_minute(), DEFAULT_REQUESTS_PER_WINDOW);
    }
}
