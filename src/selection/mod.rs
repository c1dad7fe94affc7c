mod generation;
mod persist;
mod state;

pub use generation::{Generation, GenerationToken};
pub use persist::{read_state, restore, MemoryStore, PersistedState, StateStore};
pub use state::{Event, Selection};
