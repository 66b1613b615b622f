use crate::error::{ScoringError, ScoringResult};
use crate::geo::Coordinate;

/// An upstream geocoding service.
///
/// Implementations perform exactly one round-trip per call and return the
/// top-ranked match, or `None` when nothing matched.
#[allow(async_fn_in_trait)]
pub trait Geocoder {
    async fn lookup(&self, query: &str) -> ScoringResult<Option<Coordinate>>;
}

/// Turns free-text addresses into coordinates.
pub struct CoordinateResolver<G> {
    geocoder: G,
}

impl<G: Geocoder> CoordinateResolver<G> {
    pub fn new(geocoder: G) -> Self {
        Self { geocoder }
    }

    /// Resolve an address to the first ranked match.
    ///
    /// Blank addresses fail with `NotFound` without touching the network.
    pub async fn resolve(&self, address: &str) -> ScoringResult<Coordinate> {
        let query = address.trim();
        if query.is_empty() {
            return Err(ScoringError::NotFound(address.to_string()));
        }

        tracing::debug!("Geocoding '{}'", query);
        match self.geocoder.lookup(query).await? {
            Some(coordinate) => {
                tracing::debug!(
                    "Resolved '{}' to ({}, {})",
                    query,
                    coordinate.latitude,
                    coordinate.longitude
                );
                Ok(coordinate)
            }
            None => Err(ScoringError::NotFound(query.to_string())),
        }
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }
}
