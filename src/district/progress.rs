use serde::Serialize;

use crate::dataset::{Dataset, Feature};

use super::list_districts;

/// Completion counts for one district.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub total_boards: usize,
    pub completed_boards: usize,
    pub incomplete_boards: usize,
    pub is_fully_completed: bool,
}

impl Progress {
    /// Whole percent done, 0 for an empty district.
    pub fn percent(&self) -> u32 {
        if self.total_boards == 0 { return 0 }
        (self.completed_boards as f64 / self.total_boards as f64 * 100.0).round() as u32
    }
}

/// Completed-board features plus active boards marked done count as completed;
/// active boards in any other status are incomplete. Order-less plain boards
/// are not counted.
pub fn compute_progress(dataset: &Dataset, district: &str) -> Progress {
    let (mut completed, mut incomplete) = (0, 0);

    for feature in dataset.features().iter().filter(|f| f.district() == district) {
        match feature {
            Feature::CompletedBoard(_) => completed += 1,
            Feature::Board(b) if b.is_active() && b.status.is_done() => completed += 1,
            Feature::Board(b) if b.is_active() => incomplete += 1,
            _ => {}
        }
    }

    Progress {
        total_boards: completed + incomplete,
        completed_boards: completed,
        incomplete_boards: incomplete,
        is_fully_completed: incomplete == 0 && completed > 0,
    }
}

/// Totals shown when no district is selected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct OverallSummary {
    pub district_count: usize,
    /// Board and completed-board points across all districts.
    pub total_boards: usize,
    pub average_distance_km: f64,
    pub average_hours: f64,
}

/// Averages use each district's route total (the value repeated on its boards).
pub fn overall_summary(dataset: &Dataset) -> OverallSummary {
    let districts = list_districts(dataset);
    let total_boards = dataset.filter(|f| matches!(f, Feature::Board(_) | Feature::CompletedBoard(_))).len();

    if districts.is_empty() {
        return OverallSummary { total_boards, ..Default::default() }
    }

    let (mut distance, mut hours) = (0.0, 0.0);
    for entry in &districts {
        let boards = dataset.boards_in(&entry.name);
        distance += boards.iter().find_map(|b| b.total_distance_km).unwrap_or(0.0);
        hours += boards.iter().find_map(|b| b.estimated_hours).unwrap_or(0.0);
    }

    let n = districts.len() as f64;
    OverallSummary {
        district_count: districts.len(),
        total_boards,
        average_distance_km: distance / n,
        average_hours: hours / n,
    }
}
