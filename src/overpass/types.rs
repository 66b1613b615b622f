use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::category::AmenityCategory;
use crate::error::{ScoringError, ScoringResult};
use crate::geo::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

/// An element of an Overpass `[out:json]` response.
///
/// Ways are requested with `out center;` so they carry a centroid instead
/// of their node list. Relations and anything else decode to `Other`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Node {
        lat: f64,
        lon: f64,
        #[serde(default)]
        tags: BTreeMap<String, String>,
    },
    Way {
        center: Center,
        #[serde(default)]
        tags: BTreeMap<String, String>,
    },
    #[serde(other)]
    Other,
}

impl Element {
    pub fn coordinate(&self) -> Option<Coordinate> {
        let coordinate = match self {
            Element::Node { lat, lon, .. } => Coordinate::new(*lat, *lon),
            Element::Way { center, .. } => Coordinate::new(center.lat, center.lon),
            Element::Other => return None,
        };
        coordinate.is_valid().then_some(coordinate)
    }

    pub fn tags(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Element::Node { tags, .. } | Element::Way { tags, .. } => Some(tags),
            Element::Other => None,
        }
    }

    pub fn is_way(&self) -> bool {
        matches!(self, Element::Way { .. })
    }
}

#[derive(Debug, Deserialize)]
struct RawResponse {
    elements: Vec<serde_json::Value>,
    /// Overpass reports server-side timeouts and quota errors here with HTTP 200
    #[serde(default)]
    remark: Option<String>,
}

/// Decode an Overpass response body.
///
/// A body that is not an Overpass JSON document, or that carries a runtime
/// error remark, is a query error. Individual elements missing required
/// fields are skipped.
pub fn decode_elements(body: &[u8]) -> ScoringResult<Vec<Element>> {
    let raw: RawResponse = serde_json::from_slice(body)
        .map_err(|e| ScoringError::Query(format!("Malformed Overpass response: {}", e)))?;

    if let Some(remark) = raw.remark.as_deref() {
        if remark.contains("runtime error") {
            return Err(ScoringError::Query(format!("Overpass {}", remark.trim())));
        }
    }

    let total = raw.elements.len();
    let elements: Vec<Element> = raw
        .elements
        .into_iter()
        .filter_map(|value| serde_json::from_value::<Element>(value).ok())
        .filter(|element| *element != Element::Other)
        .collect();

    if elements.len() < total {
        tracing::debug!(
            "Skipped {} of {} Overpass elements without usable geometry",
            total - elements.len(),
            total
        );
    }

    Ok(elements)
}

/// A point of interest in one of the amenity categories.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmenityRecord {
    pub category: AmenityCategory,
    pub coordinate: Coordinate,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransitStop {
    pub coordinate: Coordinate,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BikeFeature {
    pub coordinate: Coordinate,
}
