use serde::Serialize;

/// Which view the map shows.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "district", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    AllDistricts,
    DistrictSelected(String),
}

/// UI events that move the selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Select(String),
    ShowAll,
    /// Startup restore; `None` when nothing usable was persisted.
    Restore(Option<String>),
}

impl Selection {
    /// Pure transition; side effects are applied by the caller.
    pub fn apply(&self, event: Event) -> Selection {
        match event {
            Event::Select(district) | Event::Restore(Some(district)) => Selection::DistrictSelected(district),
            Event::ShowAll | Event::Restore(None) => Selection::AllDistricts,
        }
    }

    pub fn district(&self) -> Option<&str> {
        match self {
            Selection::AllDistricts => None,
            Selection::DistrictSelected(d) => Some(d),
        }
    }

    #[inline] pub fn is_all(&self) -> bool { matches!(self, Selection::AllDistricts) }
}
