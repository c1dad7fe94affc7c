use serde::Serialize;

use crate::{common::LatLng, dataset::Board};

use super::Leg;

/// A board on the ordered route list.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StopRow {
    pub order: u32,
    pub board_number: String,
    pub name: String,
    pub address: String,
    pub position: LatLng,
}

impl StopRow {
    pub(super) fn from_board(board: &Board) -> Self {
        Self {
            order: board.order,
            board_number: board.board_number.clone(),
            name: board.name.clone(),
            address: board.address.clone(),
            position: board.position,
        }
    }

    /// `【1-7】Name`, or just the name without a board number.
    pub fn title(&self) -> String {
        if self.board_number.is_empty() {
            self.name.clone()
        } else {
            format!("【{}】{}", self.board_number, self.name)
        }
    }

    pub fn popup(&self) -> String {
        format!("{}. {}\n{}", self.order, self.title(), self.address)
    }
}

/// The walk between two stops on the route list.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConnectorRow {
    pub index: usize,
    pub from_order: u32,
    pub to_order: u32,
    pub distance_km: f64,
    pub minutes: u32,
    pub time_text: String,
    /// Popup position: the middle of the drawn road path, or the arithmetic
    /// midpoint of the two stops for a straight leg.
    pub anchor: LatLng,
    pub popup: String,
    pub link: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RouteRow {
    Stop(StopRow),
    Connector(ConnectorRow),
}

/// Stops in visiting order with a connector between each consecutive pair.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RouteList {
    rows: Vec<RouteRow>,
}

impl RouteList {
    pub(super) fn build(active: &[&Board], legs: &[Leg], link: impl Fn(&Leg) -> String) -> Self {
        let mut rows = Vec::with_capacity(active.len() + legs.len());
        for (i, board) in active.iter().enumerate() {
            rows.push(RouteRow::Stop(StopRow::from_board(board)));
            if let Some(leg) = legs.get(i) {
                rows.push(RouteRow::Connector(ConnectorRow {
                    index: leg.index,
                    from_order: leg.from_order,
                    to_order: leg.to_order,
                    distance_km: leg.distance_km,
                    minutes: leg.minutes,
                    time_text: leg.time_text(),
                    anchor: leg.anchor,
                    popup: leg.popup(),
                    link: link(leg),
                }));
            }
        }
        Self { rows }
    }

    #[inline] pub fn rows(&self) -> &[RouteRow] { &self.rows }

    #[inline] pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn stops(&self) -> impl Iterator<Item = &StopRow> {
        self.rows.iter().filter_map(|r| match r { RouteRow::Stop(s) => Some(s), _ => None })
    }

    pub fn connectors(&self) -> impl Iterator<Item = &ConnectorRow> {
        self.rows.iter().filter_map(|r| match r { RouteRow::Connector(c) => Some(c), _ => None })
    }

    /// Stop with the given route order.
    pub fn stop(&self, order: u32) -> Option<&StopRow> {
        self.stops().find(|s| s.order == order)
    }

    /// Connector by zero-based leg index.
    pub fn connector(&self, index: usize) -> Option<&ConnectorRow> {
        self.connectors().find(|c| c.index == index)
    }
}
