//! Overpass QL builders for the three infrastructure queries.

use crate::geo::Coordinate;

/// Server-side evaluation limit requested from Overpass, in seconds.
const SERVER_TIMEOUT_SECS: u64 = 25;

fn around(radius_meters: u32, center: Coordinate) -> String {
    format!(
        "(around:{},{},{})",
        radius_meters, center.latitude, center.longitude
    )
}

fn wrap(statements: &[String]) -> String {
    let mut query = format!("[out:json][timeout:{}];\n(\n", SERVER_TIMEOUT_SECS);
    for statement in statements {
        query.push_str("  ");
        query.push_str(statement);
        query.push_str(";\n");
    }
    query.push_str(");\nout center;\n");
    query
}

/// Nodes and ways in any amenity category; grocery matches supermarkets
/// and convenience stores.
pub fn amenity_query(center: Coordinate, radius_meters: u32) -> String {
    let area = around(radius_meters, center);
    let amenity = r#"["amenity"~"^(restaurant|cafe|pharmacy|hospital|school|bank|post_office)$"]"#;
    let shop = r#"["shop"~"^(supermarket|convenience)$"]"#;
    wrap(&[
        format!("node{}{}", amenity, area),
        format!("way{}{}", amenity, area),
        format!("node{}{}", shop, area),
        format!("way{}{}", shop, area),
    ])
}

pub fn transit_query(center: Coordinate, radius_meters: u32) -> String {
    let area = around(radius_meters, center);
    wrap(&[
        format!(r#"node["public_transport"="stop_position"]{}"#, area),
        format!(r#"node["highway"="bus_stop"]{}"#, area),
        format!(r#"node["railway"~"^(station|halt|tram_stop)$"]{}"#, area),
    ])
}

pub fn bike_query(center: Coordinate, radius_meters: u32) -> String {
    let area = around(radius_meters, center);
    wrap(&[
        format!(r#"way["highway"="cycleway"]{}"#, area),
        format!(r#"way["cycleway"]["cycleway"!="no"]{}"#, area),
        format!(r#"node["amenity"="bicycle_rental"]{}"#, area),
    ])
}
