use serde::Serialize;

use crate::geo::{distance_meters, Coordinate};
use crate::overpass::{AmenityCategory, AmenityRecord};

/// Count and mean distance of the amenities found in one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category: AmenityCategory,
    pub count: u32,
    /// 0 when `count` is 0
    pub average_distance_meters: f64,
}

impl CategorySummary {
    pub fn empty(category: AmenityCategory) -> Self {
        Self {
            category,
            count: 0,
            average_distance_meters: 0.0,
        }
    }
}

/// Reduce amenity records to one summary per category, in
/// `AmenityCategory::ALL` order, including categories with no matches.
pub fn summarize_amenities(center: Coordinate, records: &[AmenityRecord]) -> Vec<CategorySummary> {
    AmenityCategory::ALL
        .iter()
        .map(|&category| {
            let (count, total) = records
                .iter()
                .filter(|record| record.category == category)
                .fold((0u32, 0.0f64), |(count, total), record| {
                    (count + 1, total + distance_meters(center, record.coordinate))
                });

            if count == 0 {
                CategorySummary::empty(category)
            } else {
                CategorySummary {
                    category,
                    count,
                    average_distance_meters: total / f64::from(count),
                }
            }
        })
        .collect()
}
