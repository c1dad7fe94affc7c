use geo::{Coord, Distance, Haversine, Point, Rect};
use serde::{Deserialize, Serialize};

/// A WGS84 position in map-widget order (`[lat, lng]` when serialized).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self { Self { lat, lng } }

    /// Build from a GeoJSON `[lon, lat]` position.
    #[inline] pub fn from_lon_lat(position: [f64; 2]) -> Self { Self::new(position[1], position[0]) }

    /// GeoJSON `[lon, lat]` position.
    #[inline] pub fn to_lon_lat(self) -> [f64; 2] { [self.lng, self.lat] }

    #[inline] pub fn to_point(self) -> Point<f64> { Point::new(self.lng, self.lat) }

    #[inline] pub fn to_coord(self) -> Coord<f64> { Coord { x: self.lng, y: self.lat } }
}

impl From<[f64; 2]> for LatLng {
    fn from(value: [f64; 2]) -> Self { Self::new(value[0], value[1]) }
}

impl From<LatLng> for [f64; 2] {
    fn from(value: LatLng) -> Self { [value.lat, value.lng] }
}

/// Great-circle distance in kilometres.
pub fn haversine_km(a: LatLng, b: LatLng) -> f64 {
    if a == b { return 0.0 }
    Haversine.distance(a.to_point(), b.to_point()) / 1000.0
}

/// Walking time in whole minutes, rounded to nearest.
pub fn walking_minutes(distance_km: f64, speed_kmh: f64) -> u32 {
    if !(speed_kmh > 0.0) || !distance_km.is_finite() { return 0 }
    (distance_km / speed_kmh * 60.0).round().max(0.0) as u32
}

/// Human readable duration: `45 min`, `1 h 5 min`, `2 h`.
pub fn format_minutes(minutes: u32) -> String {
    if minutes < 60 { return format!("{minutes} min") }
    let (hours, rest) = (minutes / 60, minutes % 60);
    if rest > 0 { format!("{hours} h {rest} min") } else { format!("{hours} h") }
}

/// Same as [`format_minutes`] for fractional hours.
pub fn format_hours(hours: f64) -> String {
    if !hours.is_finite() || hours <= 0.0 { return format_minutes(0) }
    format_minutes((hours * 60.0).round() as u32)
}

/// Arithmetic midpoint in degree space.
#[inline]
pub fn midpoint(a: LatLng, b: LatLng) -> LatLng {
    LatLng::new((a.lat + b.lat) / 2.0, (a.lng + b.lng) / 2.0)
}

/// Arithmetic centroid of a set of positions.
pub fn centroid(points: &[LatLng]) -> Option<LatLng> {
    if points.is_empty() { return None }
    let n = points.len() as f64;
    let (lat, lng) = points.iter().fold((0.0, 0.0), |(lat, lng), p| (lat + p.lat, lng + p.lng));
    Some(LatLng::new(lat / n, lng / n))
}

/// Bounding rectangle (x = lng, y = lat), `None` for an empty slice.
pub fn bounds(points: &[LatLng]) -> Option<Rect<f64>> {
    let first = points.first()?;
    let (mut min, mut max) = (first.to_coord(), first.to_coord());
    for p in &points[1..] {
        min.x = min.x.min(p.lng);
        min.y = min.y.min(p.lat);
        max.x = max.x.max(p.lng);
        max.y = max.y.max(p.lat);
    }
    Some(Rect::new(min, max))
}
