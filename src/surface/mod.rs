mod scene;
mod svg;

use serde::{Deserialize, Serialize};

use crate::common::LatLng;

pub use scene::{Scene, View};

/// What a marker stands for; adapters pick icons from this.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    /// First board of the active route.
    Start,
    Board,
    VotingOffice,
    CompletedBoard,
    /// One marker per district on the all-districts view.
    District,
    CurrentLocation,
    /// Translucent circle around a location fix.
    Accuracy { radius_m: f64 },
}

impl MarkerKind {
    /// Markers belonging to the user's location rather than the dataset.
    #[inline]
    pub fn is_location(&self) -> bool {
        matches!(self, MarkerKind::CurrentLocation | MarkerKind::Accuracy { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: LatLng,
    pub kind: MarkerKind,
    pub color: String,
    /// Short text drawn on the marker (route order).
    pub label: Option<String>,
    pub popup: Option<String>,
}

impl Marker {
    pub fn new(position: LatLng, kind: MarkerKind, color: impl Into<String>) -> Self {
        Self { position, kind, color: color.into(), label: None, popup: None }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_popup(mut self, popup: impl Into<String>) -> Self {
        self.popup = Some(popup.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub path: Vec<LatLng>,
    pub color: String,
    /// Dashed lines mark straight-line fallbacks.
    pub dashed: bool,
    pub popup: Option<String>,
}

impl Polyline {
    pub fn new(path: Vec<LatLng>, color: impl Into<String>) -> Self {
        Self { path, color: color.into(), dashed: false, popup: None }
    }

    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }

    pub fn with_popup(mut self, popup: impl Into<String>) -> Self {
        self.popup = Some(popup.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Popup {
    pub position: LatLng,
    pub content: String,
}

/// Transient message shown over the map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    pub text: String,
    pub duration_ms: u32,
}

/// A map widget with two independently clearable layers: points and routes.
pub trait MapSurface {
    fn clear_points(&mut self);

    fn clear_routes(&mut self);

    /// Empty both layers and drop any popup or banner. Idempotent.
    fn clear(&mut self) {
        self.clear_points();
        self.clear_routes();
    }

    /// Remove the current-location marker and its accuracy circle, if shown.
    fn clear_location(&mut self);

    fn set_view(&mut self, center: LatLng, zoom: u8);

    /// Fit the viewport to `coords`; does nothing for an empty slice.
    fn fit_bounds(&mut self, coords: &[LatLng], padding_px: u32);

    fn open_popup(&mut self, position: LatLng, content: &str);

    fn add_marker(&mut self, marker: Marker);

    fn add_polyline(&mut self, line: Polyline);

    fn show_banner(&mut self, text: &str, duration_ms: u32);
}
