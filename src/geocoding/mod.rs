pub mod nominatim;
pub mod resolver;

pub use nominatim::NominatimGeocoder;
pub use resolver::{CoordinateResolver, Geocoder};
