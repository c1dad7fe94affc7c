use serde::Serialize;

use crate::{
    common::{format_minutes, haversine_km, midpoint, walking_minutes, LatLng},
    dataset::{Board, RouteSegment},
};

/// Walk between two consecutive active boards.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Leg {
    /// Zero-based position in the route.
    pub index: usize,
    pub from_order: u32,
    pub to_order: u32,
    pub from_label: String,
    pub to_label: String,
    pub from: LatLng,
    pub to: LatLng,
    /// Straight-line (haversine) distance between the boards.
    pub distance_km: f64,
    pub minutes: u32,
    /// Drawn geometry: the matched segment's path, else the straight pair.
    pub path: Vec<LatLng>,
    /// Where popups "on the route" are anchored.
    pub anchor: LatLng,
    /// Whether a precomputed segment was found.
    pub matched: bool,
}

impl Leg {
    #[inline] pub fn time_text(&self) -> String { format_minutes(self.minutes) }

    #[inline] pub fn distance_text(&self) -> String { format!("{:.2} km", self.distance_km) }

    pub fn popup(&self) -> String {
        format!("{} → {}\nDistance: {}\nTime: {}", self.from_label, self.to_label, self.distance_text(), self.time_text())
    }
}

/// Label used for a board in segment popups: its board number, else its order.
fn board_label(board: &Board) -> String {
    if board.board_number.is_empty() { board.order.to_string() } else { board.board_number.clone() }
}

/// Legs between consecutive boards of `active` (already sorted by order).
/// Segments are matched by order in either direction.
pub fn compute_legs(active: &[&Board], segments: &[&RouteSegment], walking_speed_kmh: f64) -> Vec<Leg> {
    active.windows(2).enumerate()
        .map(|(index, pair)| {
            let (a, b) = (pair[0], pair[1]);
            let distance_km = haversine_km(a.position, b.position);

            let matched = segments.iter()
                .find(|s| s.connects(a.order, b.order))
                .and_then(|s| s.middle().map(|anchor| (s.path.clone(), anchor)));

            let (path, anchor, matched) = match matched {
                Some((path, anchor)) => (path, anchor, true),
                None => (vec![a.position, b.position], midpoint(a.position, b.position), false),
            };

            Leg {
                index,
                from_order: a.order,
                to_order: b.order,
                from_label: board_label(a),
                to_label: board_label(b),
                from: a.position,
                to: b.position,
                distance_km,
                minutes: walking_minutes(distance_km, walking_speed_kmh),
                path,
                anchor,
                matched,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use serde_json::json;

    use super::*;
    use crate::dataset::Feature;

    fn board(order: u32, lat: f64, lng: f64) -> Board {
        let value = json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [lng, lat] },
            "properties": { "district": "B", "order": order, "board_number": format!("1-{order}") }
        });
        match Feature::from_geojson(&value) { Some(Feature::Board(b)) => b, _ => unreachable!() }
    }

    fn segment(from: u32, to: u32, path: &[[f64; 2]]) -> RouteSegment {
        let value = json!({
            "type": "Feature",
            "geometry": { "type": "LineString", "coordinates": path },
            "properties": { "district": "B", "type": "route_segment", "from_point": from, "to_point": to, "segment": 1 }
        });
        match Feature::from_geojson(&value) { Some(Feature::RouteSegment(s)) => s, _ => unreachable!() }
    }

    #[test]
    fn matched_segment_supplies_path_and_anchor() {
        let (a, b) = (board(1, 35.0, 140.0), board(2, 35.01, 140.01));
        let seg = segment(2, 1, &[[140.0, 35.0], [140.0, 35.01], [140.01, 35.01]]);
        let legs = compute_legs(&[&a, &b], &[&seg], 4.0);

        assert_eq!(legs.len(), 1);
        assert!(legs[0].matched);
        assert_eq!(legs[0].path.len(), 3);
        assert_eq!(legs[0].anchor, LatLng::new(35.01, 140.0));
        assert_relative_eq!(legs[0].distance_km, haversine_km(a.position, b.position));
        assert_eq!(legs[0].minutes, walking_minutes(legs[0].distance_km, 4.0));
        assert!(legs[0].popup().starts_with("1-1 → 1-2"));
    }

    #[test]
    fn unmatched_pair_falls_back_to_straight_line() {
        let (a, b, c) = (board(1, 35.0, 140.0), board(2, 35.02, 140.0), board(3, 35.04, 140.0));
        let seg = segment(1, 3, &[[140.0, 35.0], [140.0, 35.04]]);
        let legs = compute_legs(&[&a, &b, &c], &[&seg], 4.0);

        assert_eq!(legs.len(), 2);
        assert!(legs.iter().all(|l| !l.matched));
        assert_eq!(legs[1].path, vec![b.position, c.position]);
        assert_relative_eq!(legs[1].anchor.lat, 35.03, epsilon = 1e-12);
    }

    #[test]
    fn fewer_than_two_boards_have_no_legs() {
        assert!(compute_legs(&[], &[], 4.0).is_empty());
        assert!(compute_legs(&[&board(1, 35.0, 140.0)], &[], 4.0).is_empty());
    }
}
