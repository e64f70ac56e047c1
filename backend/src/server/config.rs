//! HTTP server configuration object.

use std::net::SocketAddr;

use pawdesk::inbound::http::state::HttpState;
use pawdesk::middleware::CorsPolicy;

/// Everything [`super::create_server`] needs to start listening.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) cors: CorsPolicy,
    pub(crate) http_state: HttpState,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, cors: CorsPolicy, http_state: HttpState) -> Self {
        Self {
            bind_addr,
            cors,
            http_state,
        }
    }
}
