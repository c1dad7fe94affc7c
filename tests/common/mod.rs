#![allow(dead_code)]

use boardroute::Dataset;
use serde_json::{json, Value};

pub fn point(lon: f64, lat: f64, properties: Value) -> Value {
    json!({ "type": "Feature", "geometry": { "type": "Point", "coordinates": [lon, lat] }, "properties": properties })
}

pub fn line(coords: &[[f64; 2]], properties: Value) -> Value {
    json!({ "type": "Feature", "geometry": { "type": "LineString", "coordinates": coords }, "properties": properties })
}

pub fn board(district: &str, number: &str, order: u32, lon: f64, lat: f64, status: &str) -> Value {
    point(lon, lat, json!({
        "district": district,
        "order": order,
        "board_number": format!("{number}-{order}"),
        "name": format!("{district} board {order}"),
        "address": format!("{district} street {order}"),
        "status": status,
        "total_distance_km": 1.5,
        "estimated_hours": 0.5,
        "district_number": format!("第{number}投票区"),
    }))
}

/// Four districts:
/// - `A` (#2): boards 1..3, no segments, one simple route.
/// - `B` (#1): boards 1..2, one road-following segment 2→1, a voting office and a completed board.
/// - `C` (malformed number): a single completed board.
/// - `D` (#10): two done boards plus a completed one.
pub fn fixture_value() -> Value {
    json!({
        "type": "FeatureCollection",
        "features": [
            board("A", "2", 2, 140.110, 35.810, "done"),
            board("A", "2", 1, 140.100, 35.800, "not_yet"),
            board("A", "2", 3, 140.120, 35.820, "reserved"),
            line(&[[140.100, 35.800], [140.110, 35.810], [140.120, 35.820]], json!({ "district": "A", "type": "simple_route" })),

            board("B", "1", 1, 140.200, 35.900, "not_yet"),
            board("B", "1", 2, 140.210, 35.905, "error_missing"),
            line(&[[140.210, 35.905], [140.205, 35.906], [140.200, 35.900]],
                 json!({ "district": "B", "type": "route_segment", "from_point": 2, "to_point": 1, "segment": 1 })),
            point(140.205, 35.910, json!({ "district": "B", "name": "B office", "address": "B hall", "type": "voting_office" })),
            point(140.215, 35.915, json!({
                "district": "B", "order": 0, "board_number": "1-9", "name": "B done", "address": "B lane",
                "district_number": "第1投票区", "status": "done", "type": "completed_board"
            })),

            point(140.300, 35.700, json!({
                "district": "C", "order": 0, "name": "C done", "address": "C lane",
                "district_number": "unknown", "status": "done", "type": "completed_board"
            })),

            board("D", "10", 1, 140.400, 35.600, "done"),
            board("D", "10", 2, 140.410, 35.610, "done"),
            point(140.420, 35.620, json!({
                "district": "D", "order": 0, "district_number": "第10投票区", "status": "done", "type": "completed_board"
            })),
        ]
    })
}

pub fn fixture() -> Dataset {
    Dataset::from_value(fixture_value()).unwrap()
}
