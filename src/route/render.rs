use serde::Serialize;
use tracing::{debug, info};

use crate::{
    common::LatLng,
    config::Config,
    dataset::{Board, Dataset},
    district::{compute_progress, Progress},
    links::LinkBuilder,
    surface::{MapSurface, Marker, MarkerKind, Polyline},
};

use super::{compute_legs, ConnectorRow, Leg, RouteList, StopRow};

pub const DETAILED_ROUTE_BANNER: &str = "Detailed route: following actual roads";

/// Info panel for a selected district.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DistrictInfo {
    pub district: String,
    /// District number label (`第` / `投票区` stripped); empty when unknown.
    pub number_label: String,
    pub active_count: usize,
    pub completed_count: usize,
    pub total_distance_km: Option<f64>,
    pub estimated_hours: Option<f64>,
    pub office_name: Option<String>,
    pub progress: Progress,
}

/// Everything derived from one district render.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderedDistrict {
    pub info: DistrictInfo,
    pub legs: Vec<Leg>,
    pub route_list: RouteList,
    pub whole_route_link: Option<String>,
    /// Road-following segments were drawn.
    pub detailed: bool,
}

impl RenderedDistrict {
    /// Active board positions in visiting order.
    pub fn stops(&self) -> Vec<LatLng> {
        self.route_list.stops().map(|s| s.position).collect()
    }
}

/// Draws one district onto a [`MapSurface`].
pub struct RouteRenderer<'a> {
    config: &'a Config,
    links: LinkBuilder,
}

impl<'a> RouteRenderer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config, links: LinkBuilder::new(config.links.clone()) }
    }

    /// Clear the surface and draw `district`. Returns `None`, leaving the
    /// surface untouched, when the district has no point features at all.
    pub fn render(&self, dataset: &Dataset, district: &str, surface: &mut impl MapSurface) -> Option<RenderedDistrict> {
        let boards = dataset.boards_in(district);
        let completed = dataset.completed_in(district);
        let office = dataset.voting_office_in(district);

        let mut active: Vec<&Board> = boards.iter().copied().filter(|b| b.is_active()).collect();
        let inactive: Vec<&Board> = boards.iter().copied().filter(|b| !b.is_active()).collect();

        if active.is_empty() && inactive.is_empty() && completed.is_empty() && office.is_none() {
            debug!(district, "nothing to render");
            return None
        }

        // stable: duplicate orders keep file order
        active.sort_by_key(|b| b.order);

        let segments = dataset.segments_in(district);
        let legs = compute_legs(&active, &segments, self.config.ui.walking_speed_kmh);
        let colors = &self.config.colors;

        surface.clear();

        // routes
        let simple_route = dataset.simple_route_in(district).filter(|_| segments.is_empty());
        if let Some(route) = simple_route {
            surface.add_polyline(Polyline::new(route.path.clone(), colors.route.clone()).dashed());
        } else {
            for leg in &legs {
                surface.add_polyline(Polyline::new(leg.path.clone(), colors.route.clone()).with_popup(leg.popup()));
            }
        }
        let detailed = simple_route.is_none() && legs.iter().any(|l| l.matched);

        // points
        let mut drawn = Vec::new();
        for (i, board) in active.iter().enumerate() {
            let (kind, color) = if i == 0 {
                (MarkerKind::Start, &colors.start_point)
            } else {
                (MarkerKind::Board, &colors.normal_point)
            };
            let stop = StopRow::from_board(board);
            surface.add_marker(
                Marker::new(board.position, kind, color.clone())
                    .with_label(board.order.to_string())
                    .with_popup(stop.popup()),
            );
            drawn.push(board.position);
        }
        for board in &inactive {
            let color = if board.status.is_done() { &colors.completed_board } else { &colors.normal_point };
            surface.add_marker(
                Marker::new(board.position, MarkerKind::Board, color.clone())
                    .with_popup(format!("{}\n{}", board.name, board.address)),
            );
            drawn.push(board.position);
        }
        for board in &completed {
            surface.add_marker(
                Marker::new(board.position, MarkerKind::CompletedBoard, colors.completed_board.clone())
                    .with_label("✓")
                    .with_popup(format!("✓ {}\n{}", board.name, board.address)),
            );
            drawn.push(board.position);
        }
        if let Some(office) = office {
            surface.add_marker(
                Marker::new(office.position, MarkerKind::VotingOffice, colors.voting_office.clone())
                    .with_popup(format!("Voting office: {}\n{}", office.name, office.address)),
            );
            drawn.push(office.position);
        }

        surface.fit_bounds(&drawn, self.config.map.bounds_padding_px);
        if detailed {
            surface.show_banner(DETAILED_ROUTE_BANNER, self.config.ui.route_info_ms);
        }

        let route_list = RouteList::build(&active, &legs, |leg| self.links.segment(leg.from, leg.to));
        let stops: Vec<LatLng> = active.iter().map(|b| b.position).collect();

        let first = active.first().or(inactive.first());
        let info = DistrictInfo {
            district: district.to_string(),
            number_label: first.map(|b| b.district_number.label())
                .or(completed.first().map(|b| b.district_number.label()))
                .unwrap_or_default()
                .to_string(),
            active_count: active.len(),
            completed_count: completed.len() + active.iter().filter(|b| b.status.is_done()).count(),
            total_distance_km: active.iter().find_map(|b| b.total_distance_km),
            estimated_hours: active.iter().find_map(|b| b.estimated_hours),
            office_name: boards.iter().find_map(|b| b.office_name.clone())
                .or_else(|| office.map(|o| o.name.clone())),
            progress: compute_progress(dataset, district),
        };

        info!(district, active = active.len(), legs = legs.len(), detailed, "district rendered");
        Some(RenderedDistrict {
            info,
            legs,
            route_list,
            whole_route_link: self.links.whole_route(&stops),
            detailed,
        })
    }

    /// Recentre on a stop at detail zoom and open its popup.
    pub fn focus_stop(&self, stop: &StopRow, surface: &mut impl MapSurface) {
        surface.set_view(stop.position, self.config.map.detail_zoom);
        surface.open_popup(stop.position, &stop.popup());
    }

    /// Recentre on a connector's anchor at segment zoom and open its popup.
    pub fn focus_connector(&self, connector: &ConnectorRow, surface: &mut impl MapSurface) {
        surface.set_view(connector.anchor, self.config.map.segment_zoom);
        surface.open_popup(connector.anchor, &connector.popup);
    }
}
