use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{dataset::Dataset, error::{BoardError, Result}};

/// Last selection, as stored under the configured key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub current_district: Option<String>,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

impl PersistedState {
    pub fn new(current_district: Option<String>, now: DateTime<Utc>) -> Self {
        Self { current_district, timestamp: now.timestamp_millis() }
    }

    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| BoardError::PersistedState(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| BoardError::PersistedState(e.to_string()))
    }

    /// Time since the state was written (negative if written "in the future").
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        Duration::milliseconds(now.timestamp_millis().saturating_sub(self.timestamp))
    }
}

/// Key-value storage for the persisted state (browser local storage, a file, memory).
pub trait StateStore {
    fn load(&self, key: &str) -> Option<String>;

    fn save(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove(&mut self, key: &str);
}

/// In-memory [`StateStore`].
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }
}

impl StateStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Validate the stored state: it must parse, be younger than `max_age` and
/// name a district present in `dataset`.
pub fn read_state(store: &impl StateStore, key: &str, max_age: Duration, dataset: &Dataset, now: DateTime<Utc>) -> Result<Option<String>> {
    let Some(text) = store.load(key) else { return Ok(None) };
    let state = PersistedState::parse(&text)?;

    if state.age(now) >= max_age {
        return Err(BoardError::PersistedState(format!("state is older than {} hours", max_age.num_hours())))
    }

    match state.current_district {
        Some(district) if !dataset.has_district(&district) => {
            Err(BoardError::PersistedState(format!("district {district:?} is not in the dataset")))
        }
        district => Ok(district),
    }
}

/// District to restore at startup; any problem with the stored state means none.
pub fn restore(store: &impl StateStore, key: &str, max_age: Duration, dataset: &Dataset, now: DateTime<Utc>) -> Option<String> {
    read_state(store, key, max_age, dataset, now).unwrap_or_else(|e| {
        debug!("ignoring persisted state: {e}");
        None
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const KEY: &str = "electionBoardState";

    fn dataset() -> Dataset {
        Dataset::from_value(json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "geometry": { "type": "Point", "coordinates": [140.0, 35.0] },
                  "properties": { "district": "A", "order": 1 } }
            ]
        })).unwrap()
    }

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_750_000_000_000).unwrap()
    }

    fn store_with(state: &PersistedState) -> MemoryStore {
        let mut store = MemoryStore::new();
        store.save(KEY, &state.to_json().unwrap()).unwrap();
        store
    }

    #[test]
    fn wire_format_uses_camel_case_and_epoch_millis() {
        let state = PersistedState::new(Some("A".into()), now());
        let value: serde_json::Value = serde_json::from_str(&state.to_json().unwrap()).unwrap();
        assert_eq!(value, json!({ "currentDistrict": "A", "timestamp": 1_750_000_000_000i64 }));
    }

    #[test]
    fn fresh_state_restores() {
        let store = store_with(&PersistedState::new(Some("A".into()), now() - Duration::hours(23)));
        assert_eq!(restore(&store, KEY, Duration::hours(24), &dataset(), now()), Some("A".into()));
    }

    #[test]
    fn expired_unknown_and_malformed_state_is_ignored() {
        let max_age = Duration::hours(24);
        let old = store_with(&PersistedState::new(Some("A".into()), now() - Duration::hours(25)));
        assert!(matches!(read_state(&old, KEY, max_age, &dataset(), now()), Err(BoardError::PersistedState(_))));
        assert_eq!(restore(&old, KEY, max_age, &dataset(), now()), None);

        let gone = store_with(&PersistedState::new(Some("Z".into()), now()));
        assert_eq!(restore(&gone, KEY, max_age, &dataset(), now()), None);

        let mut garbage = MemoryStore::new();
        garbage.save(KEY, "{not json").unwrap();
        assert_eq!(restore(&garbage, KEY, max_age, &dataset(), now()), None);

        assert_eq!(restore(&MemoryStore::new(), KEY, max_age, &dataset(), now()), None);
    }

    #[test]
    fn null_district_restores_nothing() {
        let store = store_with(&PersistedState::new(None, now()));
        assert_eq!(read_state(&store, KEY, Duration::hours(24), &dataset(), now()).unwrap(), None);
    }
}
