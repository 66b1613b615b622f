use anyhow::{Context, Result};

use crate::config::Config;

/// Create the HTTP client shared by the geocoder and the Overpass client.
///
/// The per-request timeout is applied at the transport level as well, so a
/// stalled connection frees its pooled socket even if the caller's own
/// deadline is longer.
pub fn create_client(config: &Config) -> Result<reqwest::Client> {
    install_crypto_provider();
    reqwest::Client::builder()
        .user_agent(config.user_agent.trim())
        .timeout(config.request_timeout())
        .build()
        .context("Failed to create HTTP client")
}

/// Install the ring provider as the process-wide rustls default (required
/// for rustls 0.23+). Later calls are no-ops.
pub fn install_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}
