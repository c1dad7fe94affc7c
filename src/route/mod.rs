mod leg;
mod list;
mod render;

pub use leg::{compute_legs, Leg};
pub use list::{ConnectorRow, RouteList, RouteRow, StopRow};
pub use render::{DistrictInfo, RenderedDistrict, RouteRenderer, DETAILED_ROUTE_BANNER};
