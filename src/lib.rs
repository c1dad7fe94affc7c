#![doc = "boardroute public API"]
mod app;
mod clipboard;
mod common;
mod config;
mod dataset;
mod district;
mod error;
mod links;
mod locate;
mod notice;
mod route;
mod selection;
mod surface;

#[doc(inline)]
pub use app::{App, AppContext};

#[doc(inline)]
pub use common::{format_hours, format_minutes, haversine_km, walking_minutes, LatLng};

#[doc(inline)]
pub use config::{ColorConfig, Config, DataConfig, GeolocationConfig, LinkConfig, MapConfig, StorageConfig, UiConfig};

#[doc(inline)]
pub use dataset::{Board, CompletedBoard, Dataset, DistrictNumber, Feature, RouteSegment, SimpleRoute, Status, VotingOffice};

#[doc(inline)]
pub use district::{compute_progress, district_overview, draw_overview, filter_districts, list_districts, overall_summary};

#[doc(inline)]
pub use district::{DistrictEntry, OverallSummary, OverviewMarker, Progress};

#[doc(inline)]
pub use error::{BoardError, DataLoadError, GeolocationError, Result};

#[doc(inline)]
pub use links::{segment_link, whole_route_link, LinkBuilder};

#[doc(inline)]
pub use route::{compute_legs, ConnectorRow, DistrictInfo, Leg, RenderedDistrict, RouteList, RouteRenderer, RouteRow, StopRow, DETAILED_ROUTE_BANNER};

#[doc(inline)]
pub use selection::{read_state, restore, Event, Generation, GenerationToken, MemoryStore, PersistedState, Selection, StateStore};

#[doc(inline)]
pub use surface::{Banner, MapSurface, Marker, MarkerKind, Polyline, Popup, Scene, View};

#[doc(inline)]
pub use clipboard::{copy_with_fallback, Clipboard, CopyOutcome, COPY_SUCCESS_MESSAGE};

#[doc(inline)]
pub use locate::{draw_location, LocateMode, LocateToken, LocationFix};

#[doc(inline)]
pub use notice::{Notice, NoticeBoard, NoticeKind};
