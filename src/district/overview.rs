use serde::Serialize;
use tracing::debug;

use crate::{
    common::{centroid, LatLng},
    config::Config,
    dataset::{Dataset, Feature},
    surface::{MapSurface, Marker, MarkerKind},
};

use super::{compute_progress, list_districts};

/// Position and styling of one district on the all-districts view.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OverviewMarker {
    pub district: String,
    pub position: LatLng,
    pub color: String,
    pub board_count: usize,
    pub fully_completed: bool,
}

impl OverviewMarker {
    pub fn popup(&self) -> String {
        format!("{}\nBoards: {}", self.district, self.board_count)
    }
}

/// One marker per district at its voting office, else at the centroid of its
/// boards. Colors follow selector order through the palette; fully completed
/// districts use the completed color.
pub fn district_overview(dataset: &Dataset, config: &Config) -> Vec<OverviewMarker> {
    list_districts(dataset).into_iter().enumerate()
        .filter_map(|(index, entry)| {
            let points: Vec<LatLng> = dataset.features().iter()
                .filter(|f| f.district() == entry.name && !matches!(f, Feature::VotingOffice(_)))
                .filter_map(Feature::position)
                .collect();

            let position = dataset.voting_office_in(&entry.name)
                .map(|office| office.position)
                .or_else(|| centroid(&points))?;

            let fully_completed = compute_progress(dataset, &entry.name).is_fully_completed;
            let color = if fully_completed {
                config.colors.completed_district.clone()
            } else {
                config.district_color(index).to_string()
            };

            Some(OverviewMarker { district: entry.name, position, color, board_count: points.len(), fully_completed })
        })
        .collect()
}

/// Clear the surface and draw the all-districts view, fitted to every marker.
pub fn draw_overview(dataset: &Dataset, config: &Config, surface: &mut impl MapSurface) -> Vec<OverviewMarker> {
    surface.clear();

    let markers = district_overview(dataset, config);
    for marker in &markers {
        surface.add_marker(
            Marker::new(marker.position, MarkerKind::District, marker.color.clone())
                .with_popup(marker.popup()),
        );
    }

    let positions: Vec<LatLng> = markers.iter().map(|m| m.position).collect();
    if positions.is_empty() {
        surface.set_view(config.map.default_center, config.map.default_zoom);
    } else {
        surface.fit_bounds(&positions, config.map.bounds_padding_px);
    }

    debug!(districts = markers.len(), "overview drawn");
    markers
}
