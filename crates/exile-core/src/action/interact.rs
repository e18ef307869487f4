//! Direction-aware interaction
//!
//! Tagged tiles next to the player are checked first, in an order that puts
//! the preferred direction ahead of the rest. Failing that, the nearest
//! adjacent entity is picked and its behavior decides what happens.

use crate::action::{Direction, items::grant};
use crate::dungeon::{Position, TileTag};
use crate::monster::{Behavior, EntityId};
use crate::special::{ShopId, open_shop, start_dialogue, trade_with_trapper};
use crate::world::{FlagScope, WorldState};
use crate::{CHEST_GOLD, GOLD_PILE, GOLD_TAKEN_FLAG, RIDDLE_SOLVED_FLAG};

/// Dialogue tree the sage opens
const SAGE_DIALOGUE: &str = "riddle1";

/// Neighbouring cells, the preferred direction first
fn scan_order(origin: Position, preferred: Option<Direction>) -> Vec<Position> {
    let mut dirs = Direction::ALL.to_vec();
    if let Some(first) = preferred {
        dirs.retain(|d| *d != first);
        dirs.insert(0, first);
    }
    dirs.into_iter()
        .map(|d| {
            let (dx, dy) = d.delta();
            origin.offset(dx, dy)
        })
        .collect()
}

/// Try the tile interactions. Returns true if a tile consumed the interaction.
fn interact_with_tiles(state: &mut WorldState, preferred: Option<Direction>) -> bool {
    for pos in scan_order(state.player.pos, preferred) {
        let Some(tile) = state.tiles.get(&pos) else {
            continue;
        };
        let Some(tag) = tile.tag.filter(TileTag::is_interactable) else {
            continue;
        };
        let tile_name = tile.name.to_lowercase();

        let rule = state
            .current_template()
            .and_then(|t| t.tile_rule(pos, tag))
            .cloned();
        match rule {
            Some(rule) => {
                state.tiles.remove(&pos);
                grant(&mut state.player.inventory, rule.grant);
                state.flags.set(rule.flag, FlagScope::Global, None);
                state.message(rule.message);
            }
            None => state.message(format!("The {tile_name} won't budge.")),
        }
        return true;
    }
    false
}

/// Pick the entity to interact with, if any is adjacent
fn pick_entity(state: &WorldState, preferred: Option<Direction>) -> Option<EntityId> {
    let origin = state.player.pos;
    let mut candidates: Vec<_> = state
        .npcs
        .iter()
        .filter(|npc| npc.pos.chebyshev(origin) <= 1)
        .collect();

    if let Some(want) = preferred {
        let facing: Vec<_> = candidates
            .iter()
            .copied()
            .filter(|npc| Direction::primary(npc.pos.x - origin.x, npc.pos.y - origin.y) == Some(want))
            .collect();
        if !facing.is_empty() {
            candidates = facing;
        }
    }

    candidates.sort_by(|a, b| {
        a.pos
            .manhattan(origin)
            .cmp(&b.pos.manhattan(origin))
            .then_with(|| a.name.cmp(&b.name))
    });
    candidates.first().map(|npc| npc.id)
}

/// Resolve the interact command
pub fn handle_interact(state: &mut WorldState, preferred: Option<Direction>) {
    if interact_with_tiles(state, preferred) {
        return;
    }

    let Some(id) = pick_entity(state, preferred) else {
        state.message("Nothing here to interact with.");
        return;
    };
    let Some(idx) = state.npc_index(id) else {
        return;
    };
    let behavior = state.npcs[idx].behavior;

    match behavior {
        Behavior::Container if !state.npcs[idx].is_opened() => {
            state.npcs[idx].open_container();
            let flag = format!("{}.chest_opened", state.current_map);
            state.flags.set(flag, FlagScope::Global, None);
            state.player.gold += CHEST_GOLD;
            state.message("You opened the chest and found 10,000 gold!");
        }
        Behavior::Signpost => {
            state.message("Sign: North → Town Shop");
            state.message("Sign: East → Woods");
            state.message("Sign: South → Sea");
        }
        Behavior::Vendor => trade_with_trapper(state, id),
        Behavior::Shopkeeper => open_shop(state, ShopId::ItemShop),
        Behavior::Sage => {
            if state.flags.has(RIDDLE_SOLVED_FLAG) {
                state.message("Sage: The western path is already open, seeker.");
            } else if let Err(err) = start_dialogue(state, SAGE_DIALOGUE) {
                log::warn!("sage: {err}");
            }
        }
        Behavior::GoldPickup if !state.npcs[idx].is_opened() => {
            state.npcs.remove(idx);
            state.player.gold += GOLD_PILE;
            state.flags.set(GOLD_TAKEN_FLAG, FlagScope::Global, None);
            state.message("You collected 100 gold!");
        }
        Behavior::Container
        | Behavior::GoldPickup
        | Behavior::None
        | Behavior::Wander
        | Behavior::Chase
        | Behavior::Phase
        | Behavior::Charge
        | Behavior::Dormant
        | Behavior::AggressiveSlow
        | Behavior::Hut => state.message("Nothing here to interact with."),
    }
}
