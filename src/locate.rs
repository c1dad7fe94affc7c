use serde::{Deserialize, Serialize};

use crate::{
    common::LatLng,
    config::Config,
    selection::GenerationToken,
    surface::{MapSurface, Marker, MarkerKind},
};

/// A position reported by the platform geolocation API.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub lat: f64,
    pub lon: f64,
    pub accuracy_m: f64,
}

impl LocationFix {
    #[inline] pub fn position(&self) -> LatLng { LatLng::new(self.lat, self.lon) }
}

/// One-shot requests recentre the map; watch updates only move the marker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocateMode {
    #[default]
    OneShot,
    Watch,
}

/// Handle for one location request. Ids increase monotonically, so a
/// one-shot request and a watch never share a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocateToken(u64);

impl LocateToken {
    #[inline] pub fn value(self) -> u64 { self.0 }

    /// Rebuild a token handed across an FFI boundary.
    #[inline] pub fn from_value(value: u64) -> Self { Self(value) }
}

/// An outstanding request: its mode and the generation it was issued in.
#[derive(Clone, Copy, Debug)]
pub(crate) struct LocateRequest {
    pub token: LocateToken,
    pub mode: LocateMode,
    pub issued: GenerationToken,
}

/// Outstanding location requests. One-shot requests resolve once and go
/// stale on the next transition; a watch stays live until stopped.
#[derive(Clone, Debug, Default)]
pub(crate) struct LocateRequests {
    last: u64,
    pending: Vec<LocateRequest>,
}

impl LocateRequests {
    /// Issue a token. A new watch replaces any previous one.
    pub fn begin(&mut self, mode: LocateMode, issued: GenerationToken) -> LocateToken {
        self.last += 1;
        let token = LocateToken(self.last);
        if mode == LocateMode::Watch {
            self.stop_watch();
        }
        self.pending.push(LocateRequest { token, mode, issued });
        token
    }

    /// Mode of a live request. A one-shot request is consumed by its first
    /// result, live or not.
    pub fn resolve(&mut self, token: LocateToken, current: impl Fn(GenerationToken) -> bool) -> Option<LocateMode> {
        let i = self.pending.iter().position(|r| r.token == token)?;
        let request = self.pending[i];
        match request.mode {
            LocateMode::Watch => Some(LocateMode::Watch),
            LocateMode::OneShot => {
                self.pending.remove(i);
                current(request.issued).then_some(LocateMode::OneShot)
            }
        }
    }

    /// Drop the active watch; true if there was one.
    pub fn stop_watch(&mut self) -> bool {
        let before = self.pending.len();
        self.pending.retain(|r| r.mode != LocateMode::Watch);
        self.pending.len() != before
    }

    #[inline] pub fn is_watching(&self) -> bool {
        self.pending.iter().any(|r| r.mode == LocateMode::Watch)
    }
}

/// Replace the current-location marker with `fix`.
pub fn draw_location(surface: &mut impl MapSurface, fix: &LocationFix, mode: LocateMode, config: &Config) {
    surface.clear_location();

    let color = &config.colors.current_location;
    if fix.accuracy_m <= config.ui.max_accuracy_circle_m {
        surface.add_marker(Marker::new(fix.position(), MarkerKind::Accuracy { radius_m: fix.accuracy_m }, color.clone()));
    }
    surface.add_marker(
        Marker::new(fix.position(), MarkerKind::CurrentLocation, color.clone())
            .with_popup(format!("Current location\nAccuracy: about {} m", fix.accuracy_m.round())),
    );

    if mode == LocateMode::OneShot {
        surface.set_view(fix.position(), config.map.detail_zoom);
    }
}
