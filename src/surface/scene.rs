use serde::{Deserialize, Serialize};

use crate::common::{bounds, LatLng};

use super::{Banner, MapSurface, Marker, Polyline, Popup};

/// Viewport requested by the last `set_view` / `fit_bounds` call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum View {
    Center { center: LatLng, zoom: u8 },
    /// South-west and north-east corners.
    Fit { south_west: LatLng, north_east: LatLng, padding_px: u32 },
}

/// In-memory map surface: records what a widget would display.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub points: Vec<Marker>,
    pub routes: Vec<Polyline>,
    pub view: Option<View>,
    pub popup: Option<Popup>,
    pub banner: Option<Banner>,
}

impl Scene {
    pub fn new() -> Self { Self::default() }

    /// Every coordinate drawn on either layer.
    pub fn coords(&self) -> Vec<LatLng> {
        self.points.iter().map(|m| m.position)
            .chain(self.routes.iter().flat_map(|l| l.path.iter().copied()))
            .collect()
    }

    #[inline] pub fn is_empty(&self) -> bool { self.points.is_empty() && self.routes.is_empty() }

    /// Serialize for a JavaScript adapter.
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl MapSurface for Scene {
    fn clear_points(&mut self) {
        self.points.clear();
    }

    fn clear_routes(&mut self) {
        self.routes.clear();
    }

    fn clear(&mut self) {
        self.clear_points();
        self.clear_routes();
        self.popup = None;
        self.banner = None;
    }

    fn clear_location(&mut self) {
        self.points.retain(|m| !m.kind.is_location());
    }

    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.view = Some(View::Center { center, zoom });
    }

    fn fit_bounds(&mut self, coords: &[LatLng], padding_px: u32) {
        let Some(rect) = bounds(coords) else { return };
        self.view = Some(View::Fit {
            south_west: LatLng::new(rect.min().y, rect.min().x),
            north_east: LatLng::new(rect.max().y, rect.max().x),
            padding_px,
        });
    }

    fn open_popup(&mut self, position: LatLng, content: &str) {
        self.popup = Some(Popup { position, content: content.to_string() });
    }

    fn add_marker(&mut self, marker: Marker) {
        self.points.push(marker);
    }

    fn add_polyline(&mut self, line: Polyline) {
        self.routes.push(line);
    }

    fn show_banner(&mut self, text: &str, duration_ms: u32) {
        self.banner = Some(Banner { text: text.to_string(), duration_ms });
    }
}
