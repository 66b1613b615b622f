use serde::Deserialize;

use super::resolver::Geocoder;
use crate::error::{ScoringError, ScoringResult};
use crate::geo::Coordinate;

/// A single ranked match from a Nominatim search.
/// Nominatim encodes coordinates as decimal strings.
#[derive(Debug, Deserialize)]
struct SearchMatch {
    lat: String,
    lon: String,
}

impl SearchMatch {
    fn coordinate(&self) -> ScoringResult<Coordinate> {
        let parse = |field: &str, value: &str| {
            value.trim().parse::<f64>().map_err(|_| {
                ScoringError::Resolution(format!("Malformed {} in geocoder response: '{}'", field, value))
            })
        };
        let coordinate = Coordinate::new(parse("lat", &self.lat)?, parse("lon", &self.lon)?);
        if !coordinate.is_valid() {
            return Err(ScoringError::Resolution(format!(
                "Geocoder returned out-of-range coordinate ({}, {})",
                self.lat, self.lon
            )));
        }
        Ok(coordinate)
    }
}

/// Geocoder backed by a Nominatim-compatible `/search` endpoint.
#[derive(Clone)]
pub struct NominatimGeocoder {
    client: reqwest::Client,
    endpoint: String,
}

impl NominatimGeocoder {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    fn search_url(&self, query: &str) -> ScoringResult<reqwest::Url> {
        reqwest::Url::parse_with_params(
            self.endpoint.trim(),
            &[("q", query), ("format", "json"), ("limit", "1")],
        )
        .map_err(|e| ScoringError::Resolution(format!("Invalid geocoding endpoint: {}", e)))
    }
}

impl Geocoder for NominatimGeocoder {
    async fn lookup(&self, query: &str) -> ScoringResult<Option<Coordinate>> {
        let url = self.search_url(query)?;

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ScoringError::Resolution(format!("Geocoding request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoringError::Resolution(format!("Geocoder returned HTTP {}", status)));
        }

        let matches: Vec<SearchMatch> = response.json().await.map_err(|e| {
            ScoringError::Resolution(format!("Failed to parse geocoder response: {}", e))
        })?;

        matches.first().map(SearchMatch::coordinate).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::create_client;
    use crate::config::Config;
    use crate::geocoding::CoordinateResolver;
    use crate::test_support::CannedServer;

    async fn geocoder_answering(status: u16, body: &'static str) -> (CannedServer, NominatimGeocoder) {
        let server = CannedServer::start("/search", vec![(status, body)]).await;
        let geocoder = NominatimGeocoder::new(create_client(&Config::default()).unwrap(), &server.url);
        (server, geocoder)
    }

    fn parse_matches(json: &str) -> Vec<SearchMatch> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_search_url_encodes_query() {
        let geocoder = NominatimGeocoder::new(
            create_client(&Config::default()).unwrap(),
            "https://nominatim.example.org/search",
        );
        let url = geocoder.search_url("1600 Pennsylvania Ave NW, Washington").unwrap();

        assert_eq!(url.host_str(), Some("nominatim.example.org"));
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "1600 Pennsylvania Ave NW, Washington".to_string()),
                ("format".to_string(), "json".to_string()),
                ("limit".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_match_parsing() {
        let matches = parse_matches(
            r#"[{"place_id": 1, "lat": "38.8976763", "lon": "-77.0365298", "display_name": "White House"}]"#,
        );
        let coordinate = matches[0].coordinate().unwrap();
        assert_eq!(coordinate, Coordinate::new(38.8976763, -77.0365298));
    }

    #[test]
    fn test_malformed_lat_is_resolution_error() {
        let matches = parse_matches(r#"[{"lat": "north", "lon": "0"}]"#);
        assert!(matches!(matches[0].coordinate(), Err(ScoringError::Resolution(_))));
    }

    #[test]
    fn test_out_of_range_is_resolution_error() {
        let matches = parse_matches(r#"[{"lat": "123.0", "lon": "0"}]"#);
        assert!(matches!(matches[0].coordinate(), Err(ScoringError::Resolution(_))));
    }

    #[tokio::test]
    async fn test_empty_address_never_contacts_endpoint() {
        // Port 9 (discard) on loopback: any real request would fail with a
        // transport error, so NotFound proves no request was made.
        let geocoder = NominatimGeocoder::new(
            create_client(&Config::default()).unwrap(),
            "http://127.0.0.1:9/search",
        );
        let resolver = CoordinateResolver::new(geocoder);

        assert!(matches!(resolver.resolve("  ").await, Err(ScoringError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_resolution_error() {
        let geocoder = NominatimGeocoder::new(
            create_client(&Config::default()).unwrap(),
            "http://127.0.0.1:9/search",
        );

        assert!(matches!(
            geocoder.lookup("Berlin").await,
            Err(ScoringError::Resolution(_))
        ));
    }

    #[tokio::test]
    async fn test_first_match_from_endpoint() {
        let (server, geocoder) = geocoder_answering(
            200,
            r#"[{"lat": "52.5170365", "lon": "13.3888599"}, {"lat": "0", "lon": "0"}]"#,
        )
        .await;

        assert_eq!(
            geocoder.lookup("Berlin").await,
            Ok(Some(Coordinate::new(52.5170365, 13.3888599)))
        );
        assert_eq!(server.hits(), 1);
    }

    #[tokio::test]
    async fn test_no_matches_from_endpoint() {
        let (_server, geocoder) = geocoder_answering(200, "[]").await;
        assert_eq!(geocoder.lookup("Atlantis").await, Ok(None));
    }

    #[tokio::test]
    async fn test_server_error_is_resolution_error() {
        let (server, geocoder) = geocoder_answering(500, "").await;

        match geocoder.lookup("Berlin").await {
            Err(ScoringError::Resolution(msg)) => assert!(msg.contains("500")),
            other => panic!("expected Resolution error, got {:?}", other),
        }
        assert_eq!(server.hits(), 1);
    }

    #[tokio::test]
    async fn test_non_array_body_is_resolution_error() {
        let (_server, geocoder) = geocoder_answering(200, r#"{"error": "Unable to geocode"}"#).await;

        assert!(matches!(
            geocoder.lookup("Berlin").await,
            Err(ScoringError::Resolution(_))
        ));
    }
}
