//! Builders wiring outbound adapters into HTTP state.

use std::io;
use std::sync::Arc;

use mockable::DefaultClock;
use tracing::{info, warn};

use pawdesk::config::{AuthSettings, BarcodeLookupSettings};
use pawdesk::domain::ports::TokenVerifier;
use pawdesk::domain::{BarcodeLookupService, SlidingWindowRateLimiter};
use pawdesk::inbound::http::state::HttpState;
use pawdesk::outbound::auth::HttpTokenVerifier;
use pawdesk::outbound::barcode_lookup_api::BarcodeLookupApiHttpSource;
use pawdesk::outbound::open_food_facts::OpenFoodFactsHttpSource;

fn config_error(what: &str, error: impl std::fmt::Display) -> io::Error {
    io::Error::other(format!("{what}: {error}"))
}

/// Primary catalogue, plus the paid fallback when its key is configured.
fn build_barcode_lookup(settings: &BarcodeLookupSettings) -> io::Result<BarcodeLookupService> {
    let timeout = settings.timeout();
    let primary_url = settings
        .open_food_facts_url()
        .map_err(|error| config_error("invalid BARCODE_LOOKUP_OPEN_FOOD_FACTS_URL", error))?;
    let primary = OpenFoodFactsHttpSource::new(primary_url, timeout)
        .map_err(|error| config_error("build Open Food Facts client", error))?;
    let service = BarcodeLookupService::new(Arc::new(primary)).with_timeout(timeout);

    let Some(api_key) = settings.paid_api_key() else {
        info!("paid barcode lookup key not set; fallback disabled");
        return Ok(service);
    };
    let paid_url = settings
        .paid_api_url()
        .map_err(|error| config_error("invalid BARCODE_LOOKUP_PAID_API_URL", error))?;
    let fallback = BarcodeLookupApiHttpSource::new(paid_url, api_key, timeout)
        .map_err(|error| config_error("build Barcode Lookup client", error))?;
    Ok(service.with_fallback(Arc::new(fallback)))
}

fn build_token_verifier(
    auth: Option<&AuthSettings>,
    settings: &BarcodeLookupSettings,
) -> io::Result<Option<Arc<dyn TokenVerifier>>> {
    let Some(auth) = auth else {
        warn!("auth service not configured; barcode lookups will fail");
        return Ok(None);
    };
    let verifier = HttpTokenVerifier::new(&auth.url, auth.api_key.as_str(), settings.timeout())
        .map_err(|error| config_error("build token verifier", error))?;
    Ok(Some(Arc::new(verifier)))
}

/// Assemble handler state from validated settings.
///
/// # Errors
/// Returns [`io::Error`] when a configured URL is invalid or an HTTP client
/// cannot be built.
pub fn build_http_state(
    auth: Option<&AuthSettings>,
    settings: &BarcodeLookupSettings,
) -> io::Result<HttpState> {
    let barcode_lookup = build_barcode_lookup(settings)?;
    let token_verifier = build_token_verifier(auth, settings)?;
    let rate_limiter =
        SlidingWindowRateLimiter::per_minute(Arc::new(DefaultClock), settings.rate_limit_per_minute());
    Ok(HttpState::new(
        Arc::new(barcode_lookup),
        token_verifier,
        Arc::new(rate_limiter),
    ))
}
