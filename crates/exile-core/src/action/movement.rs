//! Movement and collision
//!
//! Single-step moves validated against map bounds, collidable tiles and
//! entity occupancy. A move either happens completely or not at all.

use crate::dungeon::Position;
use crate::monster::EntityId;
use crate::world::WorldState;

/// Whether an entity (other than `ignoring`) could stand on `(x, y)`.
pub fn can_move(state: &WorldState, x: i32, y: i32, ignoring: Option<EntityId>) -> bool {
    let pos = Position::new(x, y);
    if !state.in_bounds(pos) {
        return false;
    }
    if state.tiles.get(&pos).is_some_and(|tile| tile.collidable) {
        return false;
    }
    state.occupant(pos, ignoring).is_none()
}

/// Move an entity by `(dx, dy)` if the destination is free.
///
/// Returns false (and changes nothing) when blocked or when `id` is unknown.
pub fn move_entity(state: &mut WorldState, id: EntityId, dx: i32, dy: i32) -> bool {
    let Some(from) = state.entity_pos(id) else {
        return false;
    };
    let to = from.offset(dx, dy);
    if !can_move(state, to.x, to.y, Some(id)) {
        return false;
    }
    if id == EntityId::PLAYER {
        state.player.pos = to;
    } else if let Some(npc) = state.npcs.iter_mut().find(|npc| npc.id == id) {
        npc.pos = to;
    }
    true
}
