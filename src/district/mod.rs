mod catalog;
mod overview;
mod progress;

pub use catalog::{filter_districts, list_districts, DistrictEntry};
pub use overview::{district_overview, draw_overview, OverviewMarker};
pub use progress::{compute_progress, overall_summary, OverallSummary, Progress};
