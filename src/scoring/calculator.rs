use serde::Serialize;
use std::fmt;

use super::summary::CategorySummary;

/// Distance at which an amenity stops contributing proximity points.
pub const WALK_DISTANCE_METERS: f64 = 1600.0;

const SCORED_CATEGORY_COUNT: f64 = 6.0;

fn to_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

fn scored(summaries: &[CategorySummary]) -> impl Iterator<Item = &CategorySummary> {
    summaries
        .iter()
        .filter(|summary| summary.category.is_scored() && summary.count > 0)
}

/// Walk score from per-category amenity summaries.
///
/// Each of the six scored categories contributes the mean of a proximity
/// term (100 at the center, 0 at 1600 m or beyond) and a count term (10 per
/// amenity, capped at 30). The sum is divided by the fixed category count,
/// so empty categories pull the score down.
pub fn walk_score(summaries: &[CategorySummary]) -> u8 {
    let total: f64 = scored(summaries)
        .map(|summary| {
            let proximity =
                (100.0 - (summary.average_distance_meters / WALK_DISTANCE_METERS) * 100.0).max(0.0);
            let count = (f64::from(summary.count) * 10.0).min(30.0);
            (proximity + count) / 2.0
        })
        .sum();

    to_score(total / SCORED_CATEGORY_COUNT)
}

/// 15 points per stop, capped at 100.
pub fn transit_score(stop_count: u32) -> u8 {
    to_score((f64::from(stop_count) * 15.0).min(100.0))
}

/// Bike score: up to 60 points for cycling infrastructure (8 per feature)
/// plus up to 40 for reachable destinations (3 per amenity, at most 10 per
/// scored category).
pub fn bike_score(bike_feature_count: u32, summaries: &[CategorySummary]) -> u8 {
    let infrastructure = (f64::from(bike_feature_count) * 8.0).min(60.0);
    let destinations = scored(summaries)
        .map(|summary| (f64::from(summary.count) * 3.0).min(10.0))
        .sum::<f64>()
        .min(40.0);

    to_score((infrastructure + destinations).min(100.0))
}

/// Descriptive band for a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreRating {
    Excellent,
    VeryGood,
    Fair,
    Limited,
    Minimal,
}

impl ScoreRating {
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => ScoreRating::Excellent,
            70..=89 => ScoreRating::VeryGood,
            50..=69 => ScoreRating::Fair,
            25..=49 => ScoreRating::Limited,
            _ => ScoreRating::Minimal,
        }
    }

    /// Display label; the serialized form is the same words in snake_case.
    pub fn label(self) -> &'static str {
        match self {
            ScoreRating::Excellent => "Excellent",
            ScoreRating::VeryGood => "Very good",
            ScoreRating::Fair => "Fair",
            ScoreRating::Limited => "Limited",
            ScoreRating::Minimal => "Minimal",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ScoreRating::Excellent => "Daily errands do not require a car",
            ScoreRating::VeryGood => "Most errands can be done without a car",
            ScoreRating::Fair => "Some errands can be done without a car",
            ScoreRating::Limited => "Most errands require a car",
            ScoreRating::Minimal => "Almost all errands require a car",
        }
    }
}

impl fmt::Display for ScoreRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overpass::AmenityCategory;

    fn zero_summaries() -> Vec<CategorySummary> {
        AmenityCategory::ALL
            .iter()
            .map(|&c| CategorySummary::empty(c))
            .collect()
    }

    fn with(category: AmenityCategory, count: u32, avg: f64) -> Vec<CategorySummary> {
        let mut summaries = zero_summaries();
        for s in summaries.iter_mut().filter(|s| s.category == category) {
            s.count = count;
            s.average_distance_meters = avg;
        }
        summaries
    }

    #[test]
    fn test_walk_score_all_zero() {
        assert_eq!(walk_score(&zero_summaries()), 0);
        assert_eq!(walk_score(&[]), 0);
    }

    #[test]
    fn test_walk_score_single_category_at_center() {
        // proximity 100, count 30 -> contribution 65; 65 / 6 = 10.83
        assert_eq!(walk_score(&with(AmenityCategory::Bank, 5, 0.0)), 11);
    }

    #[test]
    fn test_walk_score_three_restaurants_at_200m() {
        // proximity 87.5, count 30 -> 58.75; 58.75 / 6 = 9.79
        assert_eq!(walk_score(&with(AmenityCategory::Restaurant, 3, 200.0)), 10);
    }

    #[test]
    fn test_walk_score_ignores_unscored_categories() {
        assert_eq!(walk_score(&with(AmenityCategory::Cafe, 10, 0.0)), 0);
        assert_eq!(walk_score(&with(AmenityCategory::PostOffice, 10, 0.0)), 0);
    }

    #[test]
    fn test_walk_score_distant_amenities_score_count_only() {
        // proximity clamps to 0, count 10 -> 5; 5 / 6 = 0.83
        assert_eq!(walk_score(&with(AmenityCategory::School, 1, 5000.0)), 1);
    }

    #[test]
    fn test_walk_score_maximum() {
        let summaries: Vec<_> = AmenityCategory::SCORED
            .iter()
            .map(|&category| CategorySummary {
                category,
                count: 50,
                average_distance_meters: 0.0,
            })
            .collect();
        // Each category caps at (100 + 30) / 2 = 65
        assert_eq!(walk_score(&summaries), 65);
    }

    #[test]
    fn test_transit_score() {
        assert_eq!(transit_score(0), 0);
        assert_eq!(transit_score(3), 45);
        assert_eq!(transit_score(6), 90);
        assert_eq!(transit_score(7), 100);
        assert_eq!(transit_score(u32::MAX), 100);
    }

    #[test]
    fn test_bike_score_infrastructure_only() {
        assert_eq!(bike_score(0, &zero_summaries()), 0);
        assert_eq!(bike_score(10, &zero_summaries()), 60);
        assert_eq!(bike_score(3, &zero_summaries()), 24);
    }

    #[test]
    fn test_bike_score_destinations() {
        // 3 restaurants -> 9 destination points
        assert_eq!(bike_score(0, &with(AmenityCategory::Restaurant, 3, 200.0)), 9);
        // Per-category cap of 10
        assert_eq!(bike_score(0, &with(AmenityCategory::Grocery, 20, 100.0)), 10);
        // Unscored categories never count
        assert_eq!(bike_score(0, &with(AmenityCategory::Cafe, 20, 100.0)), 0);
    }

    #[test]
    fn test_bike_score_caps() {
        let summaries: Vec<_> = AmenityCategory::SCORED
            .iter()
            .map(|&category| CategorySummary {
                category,
                count: 4,
                average_distance_meters: 100.0,
            })
            .collect();
        // Destinations 6 * 10 = 60 capped at 40; infrastructure capped at 60
        assert_eq!(bike_score(0, &summaries), 40);
        assert_eq!(bike_score(100, &summaries), 100);
    }

    #[test]
    fn test_score_rating_serializes_as_its_label() {
        for score in [0u8, 30, 60, 80, 95] {
            let rating = ScoreRating::from_score(score);
            let json = serde_json::to_value(rating).unwrap();
            let expected = rating.to_string().to_lowercase().replace(' ', "_");
            assert_eq!(json, serde_json::Value::String(expected));
        }
    }

    #[test]
    fn test_score_rating_bands() {
        assert_eq!(ScoreRating::from_score(100), ScoreRating::Excellent);
        assert_eq!(ScoreRating::from_score(90), ScoreRating::Excellent);
        assert_eq!(ScoreRating::from_score(89), ScoreRating::VeryGood);
        assert_eq!(ScoreRating::from_score(50), ScoreRating::Fair);
        assert_eq!(ScoreRating::from_score(49), ScoreRating::Limited);
        assert_eq!(ScoreRating::from_score(25), ScoreRating::Limited);
        assert_eq!(ScoreRating::from_score(24), ScoreRating::Minimal);
        assert_eq!(ScoreRating::from_score(0), ScoreRating::Minimal);
    }
}
