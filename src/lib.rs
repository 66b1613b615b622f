//! Walkability, transit, and bike scores for an address or coordinate,
//! computed from OpenStreetMap data via Nominatim and Overpass.

pub mod client;
pub mod config;
pub mod error;
pub mod geo;
pub mod geocoding;
pub mod output;
pub mod overpass;
pub mod scoring;

#[cfg(test)]
mod test_support;

pub use error::ScoringError;
pub use geo::{distance_meters, Coordinate};
pub use scoring::{Scorer, WalkabilityResult};
