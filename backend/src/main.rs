//! Backend entry-point: loads configuration, wires adapters and serves the API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use pawdesk::config::{BarcodeLookupSettings, server_settings_from_env};
use pawdesk::inbound::http::health::HealthState;
use pawdesk::middleware::CorsPolicy;
use server::{ServerConfig, build_http_state, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = server_settings_from_env(&DefaultEnv::new()).map_err(std::io::Error::other)?;
    let catalogue = BarcodeLookupSettings::load()
        .map_err(|error| std::io::Error::other(format!("load barcode lookup settings: {error}")))?;
    let http_state = build_http_state(settings.auth.as_ref(), &catalogue)?;

    info!(
        bind_addr = %settings.bind_addr,
        allowed_origins = settings.allowed_origins.len(),
        auth_configured = settings.auth.is_some(),
        fallback_enabled = catalogue.paid_api_key().is_some(),
        "starting server"
    );

    let config = ServerConfig::new(
        settings.bind_addr,
        CorsPolicy::new(settings.allowed_origins),
        http_state,
    );
    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
