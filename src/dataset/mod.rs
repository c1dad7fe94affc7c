mod dataset;
mod feature;

pub use dataset::Dataset;
pub use feature::{Board, CompletedBoard, DistrictNumber, Feature, RouteSegment, SimpleRoute, Status, VotingOffice};
