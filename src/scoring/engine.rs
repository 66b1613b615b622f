use anyhow::Result;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::calculator::{bike_score, transit_score, walk_score};
use super::summary::{summarize_amenities, CategorySummary};
use crate::client::create_client;
use crate::config::Config;
use crate::error::{ScoringError, ScoringResult};
use crate::geo::Coordinate;
use crate::geocoding::{CoordinateResolver, Geocoder, NominatimGeocoder};
use crate::overpass::{AmenityQueryClient, FeatureSource, OverpassClient};

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ScoreBreakdown {
    pub categories: Vec<CategorySummary>,
    pub transit_stop_count: u32,
    pub bike_feature_count: u32,
}

/// Outcome of one scoring run.
///
/// Scores are always populated. When `error` is set the scores are all 0
/// and the breakdown is empty; a 0 score without an error means nothing was
/// found nearby.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalkabilityResult {
    pub walk_score: u8,
    pub transit_score: u8,
    pub bike_score: u8,
    pub breakdown: ScoreBreakdown,
    /// The resolved center the infrastructure was queried around
    pub coordinate: Option<Coordinate>,
    pub error: Option<ScoringError>,
}

impl WalkabilityResult {
    pub fn degraded(coordinate: Option<Coordinate>, error: ScoringError) -> Self {
        Self {
            walk_score: 0,
            transit_score: 0,
            bike_score: 0,
            breakdown: ScoreBreakdown::default(),
            coordinate,
            error: Some(error),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone, Copy)]
struct Radii {
    amenity: u32,
    transit: u32,
    bike: u32,
}

/// Composes geocoding, infrastructure queries, and score calculation.
///
/// Holds no per-run state, so one `Scorer` can serve concurrent calls.
pub struct Scorer<G, S> {
    resolver: CoordinateResolver<G>,
    queries: AmenityQueryClient<S>,
    radii: Radii,
    timeout: Duration,
}

impl Scorer<NominatimGeocoder, OverpassClient> {
    /// Build a scorer talking to the configured Nominatim and Overpass
    /// endpoints over one pooled HTTP client.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = create_client(config)?;
        let geocoder = NominatimGeocoder::new(client.clone(), config.geocoding_endpoint.clone());
        let source = OverpassClient::new(client, config.query_endpoint.clone(), config.max_retries);
        Ok(Self::new(geocoder, source, config))
    }
}

impl<G: Geocoder, S: FeatureSource> Scorer<G, S> {
    pub fn new(geocoder: G, source: S, config: &Config) -> Self {
        Self {
            resolver: CoordinateResolver::new(geocoder),
            queries: AmenityQueryClient::new(source),
            radii: Radii {
                amenity: config.amenity_radius_meters,
                transit: config.transit_radius_meters,
                bike: config.bike_radius_meters,
            },
            timeout: config.request_timeout(),
        }
    }

    /// Score the location given by `coordinate`, or by geocoding `address`
    /// when no coordinate is supplied. Never fails; see [`WalkabilityResult`].
    pub async fn calculate_scores(
        &self,
        address: &str,
        coordinate: Option<Coordinate>,
    ) -> WalkabilityResult {
        let center = match self.locate(address, coordinate).await {
            Ok(center) => center,
            Err(e) => {
                tracing::warn!("Could not locate '{}': {}", address.trim(), e);
                return WalkabilityResult::degraded(None, e);
            }
        };

        self.score_at(center).await
    }

    /// Like [`Scorer::calculate_scores`], but returns a degraded result with
    /// [`ScoringError::Cancelled`] as soon as `cancel` fires. In-flight
    /// requests are dropped.
    pub async fn calculate_scores_with_cancel(
        &self,
        address: &str,
        coordinate: Option<Coordinate>,
        cancel: &CancellationToken,
    ) -> WalkabilityResult {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("Scoring cancelled for '{}'", address.trim());
                WalkabilityResult::degraded(
                    coordinate.filter(Coordinate::is_valid),
                    ScoringError::Cancelled,
                )
            }
            result = self.calculate_scores(address, coordinate) => result,
        }
    }

    async fn locate(&self, address: &str, coordinate: Option<Coordinate>) -> ScoringResult<Coordinate> {
        if let Some(coordinate) = coordinate {
            if !coordinate.is_valid() {
                return Err(ScoringError::Resolution(format!(
                    "Coordinate out of range: ({}, {})",
                    coordinate.latitude, coordinate.longitude
                )));
            }
            return Ok(coordinate);
        }

        if address.trim().is_empty() {
            return Err(ScoringError::MissingLocation);
        }

        with_deadline(self.timeout, self.resolver.resolve(address), ScoringError::Resolution).await
    }

    async fn score_at(&self, center: Coordinate) -> WalkabilityResult {
        let (amenities, stops, bikes) = tokio::join!(
            with_deadline(
                self.timeout,
                self.queries.query_amenities(center, self.radii.amenity),
                ScoringError::Query
            ),
            with_deadline(
                self.timeout,
                self.queries.query_transit_stops(center, self.radii.transit),
                ScoringError::Query
            ),
            with_deadline(
                self.timeout,
                self.queries.query_bike_infrastructure(center, self.radii.bike),
                ScoringError::Query
            ),
        );

        let mut failures = Vec::new();
        let amenities = absorb("amenity", amenities, &mut failures);
        let stops = absorb("transit", stops, &mut failures);
        let bikes = absorb("bike", bikes, &mut failures);

        if failures.len() == 3 {
            return WalkabilityResult::degraded(
                Some(center),
                ScoringError::AllQueriesFailed(failures.join("; ")),
            );
        }

        let categories = summarize_amenities(center, &amenities);
        let transit_stop_count = u32::try_from(stops.len()).unwrap_or(u32::MAX);
        let bike_feature_count = u32::try_from(bikes.len()).unwrap_or(u32::MAX);

        tracing::debug!(
            "Found {} amenities, {} transit stops, {} bike features around ({}, {})",
            amenities.len(),
            transit_stop_count,
            bike_feature_count,
            center.latitude,
            center.longitude
        );

        WalkabilityResult {
            walk_score: walk_score(&categories),
            transit_score: transit_score(transit_stop_count),
            bike_score: bike_score(bike_feature_count, &categories),
            breakdown: ScoreBreakdown {
                categories,
                transit_stop_count,
                bike_feature_count,
            },
            coordinate: Some(center),
            error: None,
        }
    }
}

/// Bound an outbound call; a timeout is reported like a transport failure.
async fn with_deadline<T>(
    timeout: Duration,
    call: impl Future<Output = ScoringResult<T>>,
    on_timeout: fn(String) -> ScoringError,
) -> ScoringResult<T> {
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(on_timeout(format!(
            "Request timed out after {}",
            humantime::format_duration(timeout)
        ))),
    }
}

/// A failed query counts as an empty result set.
fn absorb<T>(name: &str, result: ScoringResult<Vec<T>>, failures: &mut Vec<String>) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!("{} query failed, scoring without it: {}", name, e);
            failures.push(format!("{}: {}", name, e));
            Vec::new()
        }
    }
}
