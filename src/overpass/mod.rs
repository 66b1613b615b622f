pub mod category;
pub mod client;
pub mod query;
pub mod types;

pub use category::AmenityCategory;
pub use client::{AmenityQueryClient, FeatureSource, OverpassClient};
pub use types::{AmenityRecord, BikeFeature, Element, TransitStop};
