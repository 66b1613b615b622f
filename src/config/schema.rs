use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_GEOCODING_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_QUERY_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

/// Runtime configuration for the scoring engine.
///
/// Every field is optional in YAML; missing fields fall back to defaults.
///
/// Example YAML:
/// ```yaml
/// geocoding_endpoint: "https://nominatim.openstreetmap.org/search"
/// query_endpoint: "https://overpass-api.de/api/interpreter"
/// amenity_radius_meters: 1600
/// transit_radius_meters: 800
/// bike_radius_meters: 1600
/// per_request_timeout: "30s"
/// max_retries: 2
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Nominatim-compatible search endpoint
    pub geocoding_endpoint: String,

    /// Overpass-compatible interpreter endpoint
    pub query_endpoint: String,

    pub amenity_radius_meters: u32,
    pub transit_radius_meters: u32,
    pub bike_radius_meters: u32,

    /// Deadline for each outbound call, in humantime format ("30s", "1m")
    pub per_request_timeout: String,

    /// Retries after the first attempt for transient query failures
    pub max_retries: usize,

    /// Sent as User-Agent; public Nominatim and Overpass instances require one
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocoding_endpoint: DEFAULT_GEOCODING_ENDPOINT.to_string(),
            query_endpoint: DEFAULT_QUERY_ENDPOINT.to_string(),
            amenity_radius_meters: 1600,
            transit_radius_meters: 800,
            bike_radius_meters: 1600,
            per_request_timeout: "30s".to_string(),
            max_retries: 2,
            user_agent: format!("walk-bro/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// Parsed `per_request_timeout`. Falls back to 30s when unparsable;
    /// `validate_config` reports that case before it matters.
    pub fn request_timeout(&self) -> Duration {
        humantime::parse_duration(self.per_request_timeout.trim())
            .unwrap_or(Duration::from_secs(30))
    }
}
