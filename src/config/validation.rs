use super::schema::Config;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    // Endpoints must be absolute http(s) URLs
    for (key, endpoint) in [
        ("geocoding_endpoint", &config.geocoding_endpoint),
        ("query_endpoint", &config.query_endpoint),
    ] {
        match reqwest::Url::parse(endpoint.trim()) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => errors.push(format!(
                "{}: unsupported scheme '{}' in '{}'",
                key,
                url.scheme(),
                endpoint
            )),
            Err(e) => errors.push(format!("{}: invalid URL '{}' - {}", key, endpoint, e)),
        }
    }

    for (key, radius) in [
        ("amenity_radius_meters", config.amenity_radius_meters),
        ("transit_radius_meters", config.transit_radius_meters),
        ("bike_radius_meters", config.bike_radius_meters),
    ] {
        if radius == 0 {
            errors.push(format!("{}: must be greater than zero", key));
        }
    }

    match humantime::parse_duration(config.per_request_timeout.trim()) {
        Ok(d) if d.is_zero() => {
            errors.push("per_request_timeout: must be greater than zero".to_string());
        }
        Ok(_) => {}
        Err(e) => errors.push(format!(
            "per_request_timeout: invalid duration '{}' - {}",
            config.per_request_timeout, e
        )),
    }

    if config.user_agent.trim().is_empty() {
        errors.push("user_agent: must not be empty".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
