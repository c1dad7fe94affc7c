use std::{io::Read, path::Path};

use anyhow::Result;
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    common::{read_json_bytes, read_json_file, read_json_reader, to_pretty_json_string, write_pretty_json_file},
    error::{BoardError, DataLoadError},
};

use super::{Board, CompletedBoard, Feature, RouteSegment, SimpleRoute, VotingOffice};

/// The loaded feature collection. Immutable after load; the raw JSON is kept
/// so that exports reproduce the input exactly.
#[derive(Clone, Debug)]
pub struct Dataset {
    raw: Value,
    features: Vec<Feature>,
}

impl Dataset {
    /// Build a dataset from a parsed GeoJSON `FeatureCollection`.
    pub fn from_value(raw: Value) -> Result<Self, BoardError> {
        let Some(items) = raw.get("features").and_then(Value::as_array) else {
            return Err(DataLoadError::Schema("expected a FeatureCollection with a `features` array".into()).into())
        };

        let mut features = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            match Feature::from_geojson(item) {
                Some(feature) => features.push(feature),
                None => debug!(index = i, "skipping unrecognised feature"),
            }
        }

        info!(features = features.len(), skipped = items.len() - features.len(), "dataset loaded");
        Ok(Self { raw, features })
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, BoardError> {
        Self::from_value(read_json_bytes(bytes)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, BoardError> {
        Self::from_value(read_json_reader(reader)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, BoardError> {
        info!(path = %path.display(), "loading dataset");
        Self::from_value(read_json_file(path)?)
    }

    /// Build from an HTTP response. Non-2xx statuses fail without looking at the body.
    pub fn from_response(status: u16, body: &[u8]) -> Result<Self, BoardError> {
        if !(200..300).contains(&status) {
            return Err(DataLoadError::Http { status }.into())
        }
        Self::from_slice(body)
    }

    /// Fetch the dataset over HTTP (blocking).
    #[cfg(feature = "download")]
    pub fn fetch(url: &str) -> Result<Self, BoardError> {
        info!(url, "fetching dataset");
        let response = reqwest::blocking::get(url)
            .map_err(|e| DataLoadError::Request(format!("{url}: {e}")))?;
        let status = response.status().as_u16();
        let body = response.bytes()
            .map_err(|e| DataLoadError::Request(format!("{url}: {e}")))?;
        Self::from_response(status, &body)
    }

    /// The JSON document as loaded.
    #[inline] pub fn raw(&self) -> &Value { &self.raw }

    /// Every recognised feature in file order.
    #[inline] pub fn features(&self) -> &[Feature] { &self.features }

    #[inline] pub fn len(&self) -> usize { self.features.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.features.is_empty() }

    /// Features matching `predicate`, in file order.
    pub fn filter(&self, predicate: impl Fn(&Feature) -> bool) -> Vec<&Feature> {
        self.features.iter().filter(|f| predicate(f)).collect()
    }

    fn in_district<'a>(&'a self, district: &str) -> impl Iterator<Item = &'a Feature> {
        self.features.iter().filter(move |f| f.district() == district)
    }

    /// All plain board points of a district, active or not.
    pub fn boards_in(&self, district: &str) -> Vec<&Board> {
        self.in_district(district)
            .filter_map(|f| match f { Feature::Board(b) => Some(b), _ => None })
            .collect()
    }

    pub fn segments_in(&self, district: &str) -> Vec<&RouteSegment> {
        self.in_district(district)
            .filter_map(|f| match f { Feature::RouteSegment(s) => Some(s), _ => None })
            .collect()
    }

    /// The district's fallback line; the first one wins if the data has several.
    pub fn simple_route_in(&self, district: &str) -> Option<&SimpleRoute> {
        self.in_district(district)
            .find_map(|f| match f { Feature::SimpleRoute(r) => Some(r), _ => None })
    }

    pub fn voting_office_in(&self, district: &str) -> Option<&VotingOffice> {
        self.in_district(district)
            .find_map(|f| match f { Feature::VotingOffice(o) => Some(o), _ => None })
    }

    pub fn completed_in(&self, district: &str) -> Vec<&CompletedBoard> {
        self.in_district(district)
            .filter_map(|f| match f { Feature::CompletedBoard(b) => Some(b), _ => None })
            .collect()
    }

    /// Whether a board or completed board names this district. Voting
    /// offices alone do not make a selectable district.
    pub fn has_district(&self, district: &str) -> bool {
        self.in_district(district)
            .any(|f| matches!(f, Feature::Board(_) | Feature::CompletedBoard(_)))
    }

    /// Pretty-printed export of the dataset as loaded.
    pub fn to_pretty_json(&self) -> Result<String> {
        to_pretty_json_string(&self.raw)
    }

    /// Write the pretty-printed export to `path`.
    pub fn write_pretty(&self, path: &Path) -> Result<()> {
        crate::common::ensure_parent_dir(path)?;
        write_pretty_json_file(path, &self.raw)?;
        info!(path = %path.display(), "dataset exported");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample() -> Dataset {
        Dataset::from_value(json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "geometry": { "type": "Point", "coordinates": [140.0, 35.0] },
                  "properties": { "district": "A", "order": 1, "district_number": 1 } },
                { "type": "Feature", "geometry": { "type": "Point", "coordinates": [140.1, 35.1] },
                  "properties": { "district": "A", "order": 0, "status": "done", "type": "completed_board" } },
                { "type": "Feature", "geometry": { "type": "Point", "coordinates": [140.2, 35.2] },
                  "properties": { "district": "A", "name": "Office", "type": "voting_office" } },
                { "type": "Feature", "geometry": { "type": "LineString", "coordinates": [[140.0, 35.0], [140.2, 35.2]] },
                  "properties": { "district": "A", "type": "simple_route" } },
                { "type": "Feature", "geometry": { "type": "Polygon", "coordinates": [] }, "properties": {} }
            ]
        })).unwrap()
    }

    #[test]
    fn typed_view_skips_unrecognised_features() {
        let dataset = sample();
        assert_eq!(dataset.len(), 4);
        assert_eq!(dataset.raw()["features"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn district_accessors() {
        let dataset = sample();
        assert_eq!(dataset.boards_in("A").len(), 1);
        assert_eq!(dataset.completed_in("A").len(), 1);
        assert_eq!(dataset.voting_office_in("A").map(|o| o.name.as_str()), Some("Office"));
        assert!(dataset.simple_route_in("A").is_some());
        assert!(dataset.segments_in("A").is_empty());
        assert!(dataset.has_district("A"));
        assert!(!dataset.has_district("Z"));
        assert_eq!(dataset.filter(|f| !f.is_point()).len(), 1);
    }

    #[test]
    fn office_alone_is_not_a_district() {
        let dataset = Dataset::from_value(json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "geometry": { "type": "Point", "coordinates": [140.2, 35.2] },
                  "properties": { "district": "O", "name": "Office", "type": "voting_office" } }
            ]
        })).unwrap();
        assert!(dataset.voting_office_in("O").is_some());
        assert!(!dataset.has_district("O"));
    }

    #[test]
    fn load_errors() {
        assert!(matches!(
            Dataset::from_response(404, b"{}"),
            Err(BoardError::DataLoad(DataLoadError::Http { status: 404 }))
        ));
        assert!(matches!(
            Dataset::from_slice(b"{ not json"),
            Err(BoardError::DataLoad(DataLoadError::Json(_)))
        ));
        assert!(matches!(
            Dataset::from_slice(br#"{"type": "Feature"}"#),
            Err(BoardError::DataLoad(DataLoadError::Schema(_)))
        ));
        assert!(matches!(
            Dataset::from_file(Path::new("/nonexistent/routes.geojson")),
            Err(BoardError::DataLoad(DataLoadError::Io { .. }))
        ));
    }

    #[test]
    fn empty_collection_is_valid() {
        let dataset = Dataset::from_response(200, br#"{"type":"FeatureCollection","features":[]}"#).unwrap();
        assert!(dataset.is_empty());
    }
}
