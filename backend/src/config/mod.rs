//! Runtime configuration.
//!
//! Server wiring reads the environment through [`mockable::Env`] so it can be
//! validated in isolation; catalogue settings are layered by `ortho_config`.

pub mod barcode_lookup;
pub mod server;

pub use barcode_lookup::BarcodeLookupSettings;
pub use server::{AuthSettings, ServerConfigError, ServerSettings, server_settings_from_env};
