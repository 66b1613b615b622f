use std::time::Duration;
use tokio_retry::{strategy::ExponentialBackoff, RetryIf};

use super::category::{is_bike_feature, is_transit_stop, AmenityCategory};
use super::query::{amenity_query, bike_query, transit_query};
use super::types::{decode_elements, AmenityRecord, BikeFeature, Element, TransitStop};
use crate::error::{ScoringError, ScoringResult};
use crate::geo::Coordinate;

/// A geospatial feature service that evaluates Overpass QL.
///
/// One call is one logical request; an empty but well-formed result is `Ok`.
#[allow(async_fn_in_trait)]
pub trait FeatureSource {
    async fn fetch(&self, query: &str) -> ScoringResult<Vec<Element>>;
}

#[derive(Debug)]
enum AttemptError {
    /// Transport failures, HTTP 429 and 5xx; worth another attempt
    Transient(String),
    Fatal(String),
}

impl AttemptError {
    fn is_transient(&self) -> bool {
        matches!(self, AttemptError::Transient(_))
    }

    fn into_query_error(self) -> ScoringError {
        match self {
            AttemptError::Transient(msg) | AttemptError::Fatal(msg) => ScoringError::Query(msg),
        }
    }
}

/// HTTP client for an Overpass `interpreter` endpoint.
#[derive(Clone)]
pub struct OverpassClient {
    client: reqwest::Client,
    endpoint: String,
    max_retries: usize,
}

impl OverpassClient {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>, max_retries: usize) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            max_retries,
        }
    }

    async fn attempt(&self, query: &str) -> Result<Vec<Element>, AttemptError> {
        let response = self
            .client
            .post(self.endpoint.trim())
            .body(query.to_string())
            .send()
            .await
            .map_err(|e| AttemptError::Transient(format!("Overpass request failed: {}", e)))?;

        let status = response.status();
        if status.as_u16() == 429 || status.is_server_error() {
            return Err(AttemptError::Transient(format!("Overpass returned HTTP {}", status)));
        }
        if !status.is_success() {
            return Err(AttemptError::Fatal(format!("Overpass returned HTTP {}", status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AttemptError::Transient(format!("Failed to read Overpass response: {}", e)))?;

        decode_elements(&body).map_err(|e| AttemptError::Fatal(e.to_string()))
    }
}

impl FeatureSource for OverpassClient {
    async fn fetch(&self, query: &str) -> ScoringResult<Vec<Element>> {
        // Retry strategy: exponential backoff, max_retries attempts after the first
        let retry_strategy = ExponentialBackoff::from_millis(100)
            .max_delay(Duration::from_secs(5))
            .take(self.max_retries);

        RetryIf::start(
            retry_strategy,
            || self.attempt(query),
            |e: &AttemptError| {
                if e.is_transient() {
                    tracing::debug!("Retrying Overpass query after transient failure: {:?}", e);
                }
                e.is_transient()
            },
        )
        .await
        .map_err(AttemptError::into_query_error)
    }
}

/// Typed infrastructure queries around a center point.
pub struct AmenityQueryClient<S> {
    source: S,
}

impl<S: FeatureSource> AmenityQueryClient<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Points and ways in any of the eight amenity categories.
    pub async fn query_amenities(
        &self,
        center: Coordinate,
        radius_meters: u32,
    ) -> ScoringResult<Vec<AmenityRecord>> {
        let elements = self.source.fetch(&amenity_query(center, radius_meters)).await?;
        Ok(elements
            .iter()
            .filter_map(|element| {
                Some(AmenityRecord {
                    category: AmenityCategory::from_tags(element.tags()?)?,
                    coordinate: element.coordinate()?,
                })
            })
            .collect())
    }

    pub async fn query_transit_stops(
        &self,
        center: Coordinate,
        radius_meters: u32,
    ) -> ScoringResult<Vec<TransitStop>> {
        let elements = self.source.fetch(&transit_query(center, radius_meters)).await?;
        Ok(elements
            .iter()
            .filter(|element| element.tags().is_some_and(is_transit_stop))
            .filter_map(|element| Some(TransitStop { coordinate: element.coordinate()? }))
            .collect())
    }

    pub async fn query_bike_infrastructure(
        &self,
        center: Coordinate,
        radius_meters: u32,
    ) -> ScoringResult<Vec<BikeFeature>> {
        let elements = self.source.fetch(&bike_query(center, radius_meters)).await?;
        Ok(elements
            .iter()
            .filter(|element| {
                element
                    .tags()
                    .is_some_and(|tags| is_bike_feature(tags, element.is_way()))
            })
            .filter_map(|element| Some(BikeFeature { coordinate: element.coordinate()? }))
            .collect())
    }
}
