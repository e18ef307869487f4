//! Map runtime
//!
//! Loading a map rebuilds everything live from its template: tiles, warps and
//! fresh copies of its entities. Unlock rules whose flag is set are re-applied,
//! map flags are wiped, and then the template's on-load effects run against the
//! clean runtime.

use hashbrown::HashMap;

use super::template::{LoadEffect, MapId, UnlockRule, Warp};
use super::{Position, Tile, TileTag};
use crate::action::{Direction, can_move};
use crate::monster::{Behavior, EntityId};
use crate::world::{DebugShape, FlagScope, HookError, MapError, WorldState};

/// Open an unlock rule's cells and add its warps
fn apply_unlock(tiles: &mut HashMap<Position, Tile>, warps: &mut HashMap<Position, Warp>, rule: &UnlockRule) {
    for cell in &rule.open {
        tiles.remove(cell);
    }
    for (cell, warp) in &rule.warps {
        warps.insert(*cell, *warp);
    }
}

fn apply_effect(state: &mut WorldState, effect: &LoadEffect) -> Result<(), HookError> {
    match effect {
        LoadEffect::HideBehaviorIfFlag { behavior, flag } => {
            if state.flags.has(flag) {
                state.npcs.retain(|npc| npc.behavior != *behavior);
            }
        }
        LoadEffect::HideNamedIfFlag { names, flag } => {
            if state.flags.has(flag) {
                state.npcs.retain(|npc| !names.contains(&npc.name));
            }
        }
        LoadEffect::MarkOpenedIfFlag { names, flag } => {
            if state.flags.has(flag) {
                state
                    .npcs
                    .iter_mut()
                    .filter(|npc| names.contains(&npc.name))
                    .for_each(|npc| npc.open_container());
            }
        }
        LoadEffect::PlaceTiles {
            tile,
            cells,
            unless_flag,
        } => {
            if unless_flag.as_deref().is_some_and(|flag| state.flags.has(flag)) {
                return Ok(());
            }
            if let Some(bad) = cells.iter().find(|cell| !state.in_bounds(**cell)) {
                return Err(HookError::OutOfBounds {
                    map: state.current_map,
                    pos: *bad,
                    width: state.width,
                    height: state.height,
                });
            }
            for cell in cells {
                state.tiles.insert(*cell, tile.clone());
            }
        }
    }
    Ok(())
}

/// Closest cell to `origin` the player could stand on, by Manhattan distance.
///
/// Ties go to the upper row, then the left column. Falls back to `origin` on a
/// map with no free cell at all.
fn nearest_free(state: &WorldState, origin: Position) -> Position {
    (0..state.height)
        .flat_map(|y| (0..state.width).map(move |x| Position::new(x, y)))
        .filter(|cell| can_move(state, cell.x, cell.y, Some(EntityId::PLAYER)))
        .min_by_key(|cell| ((cell.x - origin.x).abs() + (cell.y - origin.y).abs(), cell.y, cell.x))
        .unwrap_or(origin)
}

/// Make `id` the current map.
///
/// The player lands on `spawn` if given. Otherwise they keep their position,
/// or take the centre when that position falls outside the new map, and are
/// then nudged to the nearest free cell if something already stands there.
pub fn load_map(state: &mut WorldState, id: MapId, spawn: Option<Position>) -> Result<(), MapError> {
    let template = state.registry.get(id).ok_or(MapError::UnknownMap(id))?;

    let mut tiles = HashMap::new();
    for cell in &template.walls {
        tiles.insert(*cell, Tile::wall());
    }
    for cell in &template.solids {
        tiles.insert(*cell, Tile::solid());
    }
    let mut warps = template.warps.clone();
    for rule in template.unlocks.iter().filter(|r| state.flags.has(&r.flag)) {
        apply_unlock(&mut tiles, &mut warps, rule);
    }
    let entities: Vec<_> = template
        .npcs
        .iter()
        .chain(&template.enemies)
        .cloned()
        .collect();
    let effects = template.on_load.clone();
    let (name, width, height, center) = (
        template.name.clone(),
        template.width,
        template.height,
        template.center(),
    );

    state.current_map = id;
    state.map_name = name;
    state.width = width;
    state.height = height;
    state.tiles = tiles;
    state.warps = warps;
    state.npcs.clear();
    for entity in entities {
        state.spawn(entity);
    }

    state.flags.clear_map();
    state.debug_shapes.clear();
    if state.options.debug_overlays {
        let mut shapes: Vec<_> = state
            .warps
            .iter()
            .map(|(cell, warp)| DebugShape {
                pos: *cell,
                label: format!("warp -> {}", warp.target),
            })
            .collect();
        shapes.sort_by_key(|s| s.pos);
        state.debug_shapes = shapes;
    }

    for effect in &effects {
        if let Err(err) = apply_effect(state, effect) {
            log::warn!("on-load effect skipped: {err}");
        }
    }

    state.player.pos = match spawn {
        Some(pos) => pos,
        None => {
            let kept = state.player.pos;
            let origin = if state.in_bounds(kept) { kept } else { center };
            nearest_free(state, origin)
        }
    };
    log::debug!("loaded map {id} ({width}x{height}), {} entities", state.npcs.len());
    Ok(())
}

/// Fire the warp under the player if the move direction allows it.
///
/// Returns whether a map change happened.
pub fn check_warp(state: &mut WorldState, moving: Option<Direction>) -> Result<bool, MapError> {
    let Some(warp) = state.warps.get(&state.player.pos).copied() else {
        return Ok(false);
    };
    if !warp.fires_for(moving) {
        return Ok(false);
    }
    load_map(state, warp.target, Some(warp.spawn))?;
    Ok(true)
}

/// One-shot effects of the tile the player just stepped on
pub fn process_step_triggers(state: &mut WorldState) {
    let pos = state.player.pos;
    let Some(tag) = state.tiles.get(&pos).and_then(|tile| tile.tag) else {
        return;
    };
    match tag {
        TileTag::Leaves => {
            state.tiles.remove(&pos);
            let mut woke = 0;
            for npc in state.npcs.iter_mut().filter(|n| n.behavior == Behavior::Dormant) {
                npc.behavior = Behavior::AggressiveSlow;
                woke += 1;
            }
            if woke > 0 {
                state.message("You step on crunchy leaves. A bear wakes up!");
            }
        }
        TileTag::Wall | TileTag::Torch => {}
    }
}

/// Permanently apply a map's unlock rule.
///
/// Records the unlock as a global flag, patches the live runtime if that map
/// is loaded, and leaves every later load to re-derive it. Returns false if it
/// was already unlocked.
pub fn unlock(state: &mut WorldState, map: MapId, flag: &str) -> Result<bool, MapError> {
    let template = state.registry.get(map).ok_or(MapError::UnknownMap(map))?;
    let rule = template
        .unlock_rule(flag)
        .cloned()
        .ok_or_else(|| MapError::UnknownUnlock {
            map,
            flag: flag.to_string(),
        })?;
    if state.flags.has(flag) {
        return Ok(false);
    }

    state.flags.set(flag, FlagScope::Global, None);
    if state.current_map == map {
        apply_unlock(&mut state.tiles, &mut state.warps, &rule);
    }
    state.message(rule.message);
    Ok(true)
}
