//! Shared fixtures for unit tests

use crate::dungeon::{MapId, Position, load_map};
use crate::world::{EngineOptions, Mode, WorldState};

/// A seeded world in play mode on `map`, player at `pos`, with the load's
/// messages and cues discarded.
pub fn world_on(map: MapId, pos: Position) -> WorldState {
    let mut state = WorldState::new(EngineOptions::default().with_seed(7)).expect("authored world");
    load_map(&mut state, map, Some(pos)).expect("authored map");
    state.mode = Mode::Playing;
    state.messages.clear();
    state.cues.clear();
    state
}
