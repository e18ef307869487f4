//! Monster AI
//!
//! Every mobile entity acts once per turn, in list order. The pass walks a
//! snapshot of ids so entities removed or added mid-pass are handled safely.

use crate::action::{Direction, move_entity};
use crate::combat::damage_player;
use crate::dungeon::Position;
use crate::monster::{Behavior, EntityId};
use crate::world::WorldState;
use crate::{CHARGE_BITE_DAMAGE, CHARGE_SIGHT, CHARGE_STEPS, SLOW_SWIPE_DAMAGE};

/// What one entity did on its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiAction {
    /// Nothing to do (stationary, asleep, or out of sight)
    Idle,
    /// Tried to move and could not
    Blocked,
    Moved,
    /// Hit the player for this much
    Attacked(i32),
}

fn signum_step(from: i32, to: i32) -> i32 {
    (to - from).signum()
}

/// Take one unit step. A zero delta counts as a failed step.
fn try_step(state: &mut WorldState, id: EntityId, dx: i32, dy: i32) -> bool {
    if dx == 0 && dy == 0 {
        return false;
    }
    move_entity(state, id, dx, dy)
}

/// Step toward the player along the axis of greater displacement, falling
/// back to the other axis.
fn step_toward_major(state: &mut WorldState, id: EntityId, pos: Position) -> bool {
    let target = state.player.pos;
    let dx = signum_step(pos.x, target.x);
    let dy = signum_step(pos.y, target.y);
    if (target.x - pos.x).abs() >= (target.y - pos.y).abs() {
        try_step(state, id, dx, 0) || try_step(state, id, 0, dy)
    } else {
        try_step(state, id, 0, dy) || try_step(state, id, dx, 0)
    }
}

fn wander(state: &mut WorldState, id: EntityId) -> AiAction {
    let Some(dir) = state.rng.choose(&Direction::ALL).copied() else {
        return AiAction::Idle;
    };
    let (dx, dy) = dir.delta();
    if move_entity(state, id, dx, dy) {
        AiAction::Moved
    } else {
        AiAction::Blocked
    }
}

/// Greedy x-then-y pursuit
fn chase(state: &mut WorldState, id: EntityId, pos: Position) -> AiAction {
    let target = state.player.pos;
    let dx = signum_step(pos.x, target.x);
    let dy = signum_step(pos.y, target.y);
    if try_step(state, id, dx, 0) || try_step(state, id, 0, dy) {
        AiAction::Moved
    } else {
        AiAction::Blocked
    }
}

/// Diagonal drift through anything, wrapping at the map edges.
///
/// The entity never fails to move unless every diagonal lands on another
/// occupant, in which case it stays put.
fn phase(state: &mut WorldState, id: EntityId, pos: Position) -> AiAction {
    let sx = state.rng.sign();
    let sy = state.rng.sign();
    let (w, h) = (state.width.max(1), state.height.max(1));

    for (mx, my) in [(sx, sy), (-sx, sy), (sx, -sy), (-sx, -sy)] {
        let to = Position::new((pos.x + mx).rem_euclid(w), (pos.y + my).rem_euclid(h));
        if state.occupant(to, Some(id)).is_none() {
            if let Some(idx) = state.npc_index(id) {
                state.npcs[idx].pos = to;
            }
            return AiAction::Moved;
        }
    }
    AiAction::Blocked
}

/// Close in with up to `steps` moves, then hit on adjacency
fn close_and_strike(
    state: &mut WorldState,
    id: EntityId,
    steps: usize,
    damage: i32,
    verb: &str,
) -> AiAction {
    let mut moved = false;
    for _ in 0..steps {
        let Some(pos) = state.entity_pos(id) else {
            break;
        };
        moved |= step_toward_major(state, id, pos);
    }

    let Some(idx) = state.npc_index(id) else {
        return AiAction::Idle;
    };
    if state.npcs[idx].pos.manhattan(state.player.pos) == 1 {
        let source = format!("{} {verb}", state.npcs[idx].name);
        damage_player(state, damage, &source);
        AiAction::Attacked(damage)
    } else if moved {
        AiAction::Moved
    } else {
        AiAction::Blocked
    }
}

/// Advance a single entity by its behavior
pub fn act(state: &mut WorldState, id: EntityId) -> AiAction {
    let Some(idx) = state.npc_index(id) else {
        return AiAction::Idle;
    };
    let pos = state.npcs[idx].pos;
    let behavior = state.npcs[idx].behavior;

    match behavior {
        Behavior::Wander => wander(state, id),
        Behavior::Chase => chase(state, id, pos),
        Behavior::Phase => phase(state, id, pos),
        Behavior::Charge => {
            if pos.manhattan(state.player.pos) <= CHARGE_SIGHT {
                close_and_strike(state, id, CHARGE_STEPS, CHARGE_BITE_DAMAGE, "bite")
            } else {
                AiAction::Idle
            }
        }
        Behavior::AggressiveSlow => close_and_strike(state, id, 1, SLOW_SWIPE_DAMAGE, "swipe"),
        Behavior::Dormant
        | Behavior::None
        | Behavior::Vendor
        | Behavior::Shopkeeper
        | Behavior::Container
        | Behavior::Signpost
        | Behavior::Sage
        | Behavior::GoldPickup
        | Behavior::Hut => AiAction::Idle,
    }
}

/// Run one AI pass over every entity on the map, in list order
pub fn run_ai(state: &mut WorldState) -> Vec<(EntityId, AiAction)> {
    let ids: Vec<EntityId> = state
        .npcs
        .iter()
        .filter(|npc| npc.behavior.is_mobile())
        .map(|npc| npc.id)
        .collect();

    ids.into_iter().map(|id| (id, act(state, id))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::MapId;
    use crate::monster::{Alignment, Entity};
    use crate::test_support::world_on;
    use crate::world::Mode;

    fn hostile(x: i32, y: i32, name: &str, behavior: Behavior) -> Entity {
        Entity::new(x, y, 'm', name, "", behavior)
            .with_health(3)
            .with_alignment(Alignment::Hostile)
            .attackable()
    }

    #[test]
    fn test_chase_prefers_x() {
        let mut state = world_on(MapId::ForestA, Position::new(10, 10));
        let id = state.spawn(hostile(5, 5, "Wolf", Behavior::Chase));
        assert_eq!(act(&mut state, id), AiAction::Moved);
        assert_eq!(state.entity_pos(id), Some(Position::new(6, 5)));
    }

    #[test]
    fn test_chase_falls_back_to_y() {
        let mut state = world_on(MapId::ForestA, Position::new(10, 10));
        let id = state.spawn(hostile(5, 5, "Wolf", Behavior::Chase));
        state.spawn(Entity::new(6, 5, 'r', "Rock", "", Behavior::None));
        act(&mut state, id);
        assert_eq!(state.entity_pos(id), Some(Position::new(5, 6)));

        // Same column: x step is zero and counts as failed
        let mut state = world_on(MapId::ForestA, Position::new(5, 10));
        let id = state.spawn(hostile(5, 5, "Wolf", Behavior::Chase));
        act(&mut state, id);
        assert_eq!(state.entity_pos(id), Some(Position::new(5, 6)));
    }

    #[test]
    fn test_charge_two_steps_and_bite() {
        let mut state = world_on(MapId::ForestA, Position::new(8, 5));
        let id = state.spawn(hostile(5, 5, "Pig", Behavior::Charge));
        let health = state.player.health;
        assert_eq!(act(&mut state, id), AiAction::Attacked(CHARGE_BITE_DAMAGE));
        assert_eq!(state.entity_pos(id), Some(Position::new(7, 5)));
        assert_eq!(state.player.health, health - CHARGE_BITE_DAMAGE);
        assert!(state.messages.contains("Pig bite hits you for 1!"));
    }

    #[test]
    fn test_charge_ignores_distant_player() {
        let mut state = world_on(MapId::ForestA, Position::new(20, 12));
        let id = state.spawn(hostile(2, 2, "Pig", Behavior::Charge));
        assert_eq!(act(&mut state, id), AiAction::Idle);
        assert_eq!(state.entity_pos(id), Some(Position::new(2, 2)));
    }

    #[test]
    fn test_dormant_sleeps_awake_swipes() {
        let mut state = world_on(MapId::ForestA, Position::new(7, 5));
        let id = state.spawn(hostile(5, 5, "Bear", Behavior::Dormant));
        assert!(run_ai(&mut state).iter().all(|(_, a)| *a == AiAction::Idle));

        let idx = state.npc_index(id).unwrap();
        state.npcs[idx].behavior = Behavior::AggressiveSlow;
        assert_eq!(act(&mut state, id), AiAction::Attacked(SLOW_SWIPE_DAMAGE));
        assert!(state.messages.contains("Bear swipe hits you for 2!"));
    }

    #[test]
    fn test_phase_wraps_and_never_shares() {
        let mut state = world_on(MapId::ForestA, Position::new(10, 10));
        let id = state.spawn(hostile(0, 0, "Ghost", Behavior::Phase));
        for _ in 0..50 {
            assert_eq!(act(&mut state, id), AiAction::Moved);
            let pos = state.entity_pos(id).unwrap();
            assert!(pos.x >= 0 && pos.x < state.width);
            assert!(pos.y >= 0 && pos.y < state.height);
            assert_ne!(pos, state.player.pos);
        }
    }

    #[test]
    fn test_phase_stays_put_when_boxed_in() {
        let mut state = world_on(MapId::ForestA, Position::new(4, 4));
        let id = state.spawn(hostile(5, 5, "Ghost", Behavior::Phase));
        for (x, y) in [(6, 4), (4, 6), (6, 6)] {
            state.spawn(Entity::new(x, y, 'r', "Rock", "", Behavior::None));
        }
        assert_eq!(act(&mut state, id), AiAction::Blocked);
        assert_eq!(state.entity_pos(id), Some(Position::new(5, 5)));
    }

    #[test]
    fn test_lethal_bite_kills_player() {
        let mut state = world_on(MapId::ForestA, Position::new(6, 5));
        state.player.health = 1;
        state.spawn(hostile(5, 5, "Pig", Behavior::Charge));
        run_ai(&mut state);
        assert_eq!(state.mode, Mode::Dead);
    }
}
