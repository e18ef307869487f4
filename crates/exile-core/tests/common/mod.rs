//! Fixtures shared by the integration tests

#![allow(dead_code)]

use exile_core::dungeon::{MapId, Position, load_map};
use exile_core::world::{EngineOptions, Mode, WorldState};

/// Seeded world in play mode on `map`, player at `pos`
pub fn world_on(map: MapId, pos: Position, seed: u64) -> WorldState {
    let mut state = WorldState::new(EngineOptions::default().with_seed(seed)).unwrap();
    load_map(&mut state, map, Some(pos)).unwrap();
    state.mode = Mode::Playing;
    state.messages.clear();
    state
}

/// Every occupied cell, player first
pub fn occupied(state: &WorldState) -> Vec<Position> {
    std::iter::once(state.player.pos)
        .chain(state.npcs.iter().map(|npc| npc.pos))
        .collect()
}
