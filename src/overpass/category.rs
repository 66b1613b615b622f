use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Point-of-interest categories used as walkability signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmenityCategory {
    Restaurant,
    Cafe,
    Grocery,
    Pharmacy,
    Hospital,
    School,
    Bank,
    PostOffice,
}

impl AmenityCategory {
    pub const ALL: [AmenityCategory; 8] = [
        AmenityCategory::Restaurant,
        AmenityCategory::Cafe,
        AmenityCategory::Grocery,
        AmenityCategory::Pharmacy,
        AmenityCategory::Hospital,
        AmenityCategory::School,
        AmenityCategory::Bank,
        AmenityCategory::PostOffice,
    ];

    /// Categories that feed the walk and bike scores. Cafes and post offices
    /// are collected for the breakdown only.
    pub const SCORED: [AmenityCategory; 6] = [
        AmenityCategory::Restaurant,
        AmenityCategory::Grocery,
        AmenityCategory::Pharmacy,
        AmenityCategory::Hospital,
        AmenityCategory::School,
        AmenityCategory::Bank,
    ];

    pub fn is_scored(self) -> bool {
        Self::SCORED.contains(&self)
    }

    /// Classify an OSM element by its tags.
    pub fn from_tags(tags: &BTreeMap<String, String>) -> Option<Self> {
        if let Some(amenity) = tags.get("amenity") {
            let category = match amenity.as_str() {
                "restaurant" => Some(AmenityCategory::Restaurant),
                "cafe" => Some(AmenityCategory::Cafe),
                "pharmacy" => Some(AmenityCategory::Pharmacy),
                "hospital" => Some(AmenityCategory::Hospital),
                "school" => Some(AmenityCategory::School),
                "bank" => Some(AmenityCategory::Bank),
                "post_office" => Some(AmenityCategory::PostOffice),
                _ => None,
            };
            if category.is_some() {
                return category;
            }
        }

        match tags.get("shop").map(String::as_str) {
            Some("supermarket") | Some("convenience") => Some(AmenityCategory::Grocery),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AmenityCategory::Restaurant => "Restaurant",
            AmenityCategory::Cafe => "Cafe",
            AmenityCategory::Grocery => "Grocery",
            AmenityCategory::Pharmacy => "Pharmacy",
            AmenityCategory::Hospital => "Hospital",
            AmenityCategory::School => "School",
            AmenityCategory::Bank => "Bank",
            AmenityCategory::PostOffice => "Post office",
        }
    }
}

impl fmt::Display for AmenityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Public-transport stop positions, bus stops, and rail stations/halts/tram stops.
pub fn is_transit_stop(tags: &BTreeMap<String, String>) -> bool {
    let tag = |key: &str| tags.get(key).map(String::as_str);
    tag("public_transport") == Some("stop_position")
        || tag("highway") == Some("bus_stop")
        || matches!(tag("railway"), Some("station") | Some("halt") | Some("tram_stop"))
}

/// Cycleways and bike-share docks. `is_way` distinguishes linear features,
/// since a `cycleway=*` tag only counts on ways.
pub fn is_bike_feature(tags: &BTreeMap<String, String>, is_way: bool) -> bool {
    let tag = |key: &str| tags.get(key).map(String::as_str);
    if is_way {
        tag("highway") == Some("cycleway") || matches!(tag("cycleway"), Some(v) if v != "no")
    } else {
        tag("amenity") == Some("bicycle_rental")
    }
}
