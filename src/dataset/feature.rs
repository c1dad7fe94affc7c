use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::common::LatLng;

/// Visiting status of a board as written by the data producer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum Status {
    Done,
    NotYet,
    Reserved,
    /// `error_*`, kept verbatim with its suffix.
    Error(String),
    Other,
    #[default]
    Unknown,
}

impl Status {
    pub fn parse(text: Option<&str>) -> Self {
        match text.map(str::trim) {
            None | Some("") | Some("unknown") => Status::Unknown,
            Some("done") => Status::Done,
            Some("not_yet") => Status::NotYet,
            Some("reserved") => Status::Reserved,
            Some(s) if s.starts_with("error") => Status::Error(s.to_string()),
            Some(_) => Status::Other,
        }
    }

    #[inline] pub fn is_done(&self) -> bool { matches!(self, Status::Done) }

    pub fn as_str(&self) -> &str {
        match self {
            Status::Done => "done",
            Status::NotYet => "not_yet",
            Status::Reserved => "reserved",
            Status::Error(s) => s,
            Status::Other => "other",
            Status::Unknown => "unknown",
        }
    }
}

impl From<Status> for String {
    fn from(value: Status) -> Self { value.as_str().to_string() }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = Option::<String>::deserialize(deserializer)?;
        Ok(Status::parse(text.as_deref()))
    }
}

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

/// District identifier as written in the data, either `12` or `"第12投票区"`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DistrictNumber(String);

impl DistrictNumber {
    pub fn new(text: impl Into<String>) -> Self { Self(text.into()) }

    #[inline] pub fn as_str(&self) -> &str { &self.0 }

    /// First run of ASCII digits, or 0 when there is none (or it overflows).
    pub fn numeric(&self) -> u32 {
        DIGITS.find(&self.0)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    }

    /// Display label with the `第` prefix and `投票区` suffix removed.
    pub fn label(&self) -> &str {
        let text = self.0.trim();
        let text = text.strip_prefix('第').unwrap_or(text);
        text.strip_suffix("投票区").unwrap_or(text)
    }
}

impl<'de> Deserialize<'de> for DistrictNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(DistrictNumber(value_text(Option::<Value>::deserialize(deserializer)?)))
    }
}

fn value_text(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Strings that producers sometimes write as numbers (board numbers).
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(value_text(Option::<Value>::deserialize(deserializer)?))
}

/// Non-negative integers that may arrive as floats or numeric strings; garbage is 0.
fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let n = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64().or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(n.and_then(|n| u32::try_from(n).ok()).unwrap_or(0))
}

/// A poster board. `order == 0` means the board is not on the active route.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    #[serde(skip_deserializing, default = "origin")]
    pub position: LatLng,
    #[serde(default, deserialize_with = "lenient_text")]
    pub district: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub order: u32,
    #[serde(default, deserialize_with = "lenient_text")]
    pub board_number: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub address: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub total_points: Option<u32>,
    #[serde(default)]
    pub total_distance_km: Option<f64>,
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    #[serde(default)]
    pub district_number: DistrictNumber,
    #[serde(default)]
    pub office_name: Option<String>,
}

impl Board {
    #[inline] pub fn is_active(&self) -> bool { self.order >= 1 }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VotingOffice {
    #[serde(skip_deserializing, default = "origin")]
    pub position: LatLng,
    #[serde(default, deserialize_with = "lenient_text")]
    pub district: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub address: String,
    #[serde(default)]
    pub district_number: Option<DistrictNumber>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompletedBoard {
    #[serde(skip_deserializing, default = "origin")]
    pub position: LatLng,
    #[serde(default, deserialize_with = "lenient_text")]
    pub district: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub board_number: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub address: String,
    #[serde(default)]
    pub district_number: DistrictNumber,
    #[serde(default)]
    pub status: Status,
}

/// Precomputed path between the boards with orders `from_point` and `to_point`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    #[serde(skip_deserializing)]
    pub path: Vec<LatLng>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub district: String,
    #[serde(deserialize_with = "lenient_u32")]
    pub from_point: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub to_point: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub segment: u32,
}

impl RouteSegment {
    /// Direction-agnostic match against a pair of orders.
    pub fn connects(&self, a: u32, b: u32) -> bool {
        (self.from_point == a && self.to_point == b) || (self.from_point == b && self.to_point == a)
    }

    /// Coordinate in the middle of the path, used to anchor popups on the route.
    pub fn middle(&self) -> Option<LatLng> { self.path.get(self.path.len() / 2).copied() }
}

/// Straight fallback line through a district's boards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimpleRoute {
    #[serde(skip_deserializing)]
    pub path: Vec<LatLng>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub district: String,
}

fn origin() -> LatLng { LatLng::new(0.0, 0.0) }

/// Feature kinds, discriminated by `geometry.type` and `properties.type`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Feature {
    Board(Board),
    VotingOffice(VotingOffice),
    CompletedBoard(CompletedBoard),
    RouteSegment(RouteSegment),
    SimpleRoute(SimpleRoute),
}

impl Feature {
    /// Decode one GeoJSON feature. Returns `None` for features that are not
    /// a recognised point or line, or whose geometry/properties are unusable.
    pub fn from_geojson(value: &Value) -> Option<Feature> {
        let geometry = value.get("geometry")?;
        let properties = value.get("properties").cloned().unwrap_or(Value::Object(Default::default()));
        let kind = properties.get("type").and_then(Value::as_str);
        let coordinates = geometry.get("coordinates")?;

        match geometry.get("type").and_then(Value::as_str)? {
            "Point" => {
                let position = LatLng::from_lon_lat(lon_lat(coordinates)?);
                match kind {
                    Some("voting_office") => {
                        let office: VotingOffice = serde_json::from_value(properties).ok()?;
                        Some(Feature::VotingOffice(VotingOffice { position, ..office }))
                    }
                    Some("completed_board") => {
                        let board: CompletedBoard = serde_json::from_value(properties).ok()?;
                        Some(Feature::CompletedBoard(CompletedBoard { position, ..board }))
                    }
                    Some("route_segment") | Some("simple_route") => None,
                    _ => {
                        let board: Board = serde_json::from_value(properties).ok()?;
                        Some(Feature::Board(Board { position, ..board }))
                    }
                }
            }
            "LineString" => {
                let path = coordinates.as_array()?
                    .iter()
                    .map(|c| lon_lat(c).map(LatLng::from_lon_lat))
                    .collect::<Option<Vec<_>>>()?;
                match kind {
                    Some("route_segment") => {
                        let segment: RouteSegment = serde_json::from_value(properties).ok()?;
                        Some(Feature::RouteSegment(RouteSegment { path, ..segment }))
                    }
                    Some("simple_route") => {
                        let route: SimpleRoute = serde_json::from_value(properties).ok()?;
                        Some(Feature::SimpleRoute(SimpleRoute { path, ..route }))
                    }
                    _ => None,
                }
            }
            _ => None,
        }
    }

    pub fn district(&self) -> &str {
        match self {
            Feature::Board(f) => &f.district,
            Feature::VotingOffice(f) => &f.district,
            Feature::CompletedBoard(f) => &f.district,
            Feature::RouteSegment(f) => &f.district,
            Feature::SimpleRoute(f) => &f.district,
        }
    }

    /// Position of point features.
    pub fn position(&self) -> Option<LatLng> {
        match self {
            Feature::Board(f) => Some(f.position),
            Feature::VotingOffice(f) => Some(f.position),
            Feature::CompletedBoard(f) => Some(f.position),
            Feature::RouteSegment(_) | Feature::SimpleRoute(_) => None,
        }
    }

    #[inline] pub fn is_point(&self) -> bool { self.position().is_some() }
}

/// `[lon, lat]` with optional trailing elevation.
fn lon_lat(value: &Value) -> Option<[f64; 2]> {
    let array = value.as_array()?;
    let lon = array.first()?.as_f64()?;
    let lat = array.get(1)?.as_f64()?;
    (lon.is_finite() && lat.is_finite()).then_some([lon, lat])
}
