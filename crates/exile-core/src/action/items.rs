//! Item use and per-turn item effects

use crate::combat::attack;
use crate::object::{Inventory, ItemId, ItemState};
use crate::world::{SoundCue, WorldState};
use crate::{BOW_DAMAGE, BOW_RANGE, SWORD_DAMAGE, SWORD_RANGE, TORCH_DURATION, TORCH_WARNING};

/// Put one `item` into an inventory with its initial state.
///
/// A torch arrives lit; receiving one while already holding a torch refreshes
/// its fuel to at least a full torch.
pub fn grant(inventory: &mut Inventory, item: ItemId) {
    match item {
        ItemId::Torch => {
            let remaining = match inventory.get(item) {
                Some(ItemState::Stateful { remaining, .. }) => (*remaining).max(TORCH_DURATION),
                _ => TORCH_DURATION,
            };
            inventory.set(
                item,
                ItemState::Stateful {
                    remaining,
                    active: true,
                },
            );
        }
        ItemId::Bow
        | ItemId::Sword
        | ItemId::RabbitCorpse
        | ItemId::PigCarcass
        | ItemId::BearPelt => inventory.add(item, 1),
    }
}

/// Use an owned item
pub fn use_item(state: &mut WorldState, item: ItemId) {
    if !state.player.inventory.has(item) {
        state.message(format!("You don't have a {}.", item.name()));
        return;
    }

    match item {
        ItemId::Sword => attack(state, "Sword Slash", SWORD_DAMAGE, SWORD_RANGE, SoundCue::Sword),
        ItemId::Bow => attack(state, "Bow Shot", BOW_DAMAGE, BOW_RANGE, SoundCue::Bow),
        ItemId::Torch => {
            let lit = match state.player.inventory.get_mut(item) {
                Some(ItemState::Stateful { active, .. }) => {
                    *active = !*active;
                    *active
                }
                _ => return,
            };
            if lit {
                state.message("You light the torch.");
            } else {
                state.message("You snuff out the torch.");
            }
        }
        ItemId::RabbitCorpse | ItemId::PigCarcass | ItemId::BearPelt => {
            state.message(format!("You can't use the {} here.", item.name()));
        }
    }
}

/// Burn down active stateful items by one turn
pub fn tick_timed_items(state: &mut WorldState) {
    let mut burnt_out = Vec::new();
    let mut warnings = Vec::new();

    for (id, item) in state.player.inventory.iter_mut() {
        if let ItemState::Stateful { remaining, active } = item {
            if !*active {
                continue;
            }
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                burnt_out.push(id);
            } else if *remaining == TORCH_WARNING {
                warnings.push(id);
            }
        }
    }

    for id in warnings {
        state.message(format!("Your {} flickers.", id.name().to_lowercase()));
    }
    for id in burnt_out {
        state.player.inventory.remove(id);
        state.message(format!("Your {} burns out.", id.name().to_lowercase()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::{MapId, Position};
    use crate::test_support::world_on;

    fn torch(remaining: u32, active: bool) -> ItemState {
        ItemState::Stateful { remaining, active }
    }

    #[test]
    fn test_grant_torch_refreshes() {
        let mut inv = Inventory::new();
        inv.set(ItemId::Torch, torch(12, false));
        grant(&mut inv, ItemId::Torch);
        assert_eq!(inv.get(ItemId::Torch), Some(&torch(TORCH_DURATION, true)));

        inv.set(ItemId::Torch, torch(TORCH_DURATION + 5, false));
        grant(&mut inv, ItemId::Torch);
        assert_eq!(inv.get(ItemId::Torch), Some(&torch(TORCH_DURATION + 5, true)));
    }

    #[test]
    fn test_use_missing_item() {
        let mut state = world_on(MapId::ForestA, Position::new(5, 5));
        use_item(&mut state, ItemId::Sword);
        assert!(state.messages.contains("You don't have a Sword."));
    }

    #[test]
    fn test_torch_toggle_and_burn() {
        let mut state = world_on(MapId::ForestA, Position::new(5, 5));
        state.player.inventory.set(ItemId::Torch, torch(TORCH_WARNING + 1, true));

        tick_timed_items(&mut state);
        assert!(state.messages.contains("Your torch flickers."));

        use_item(&mut state, ItemId::Torch);
        assert!(state.messages.contains("You snuff out the torch."));
        tick_timed_items(&mut state);
        assert_eq!(
            state.player.inventory.get(ItemId::Torch),
            Some(&torch(TORCH_WARNING, false))
        );
    }

    #[test]
    fn test_torch_burns_out() {
        let mut state = world_on(MapId::ForestA, Position::new(5, 5));
        state.player.inventory.set(ItemId::Torch, torch(1, true));
        tick_timed_items(&mut state);
        assert!(!state.player.inventory.has(ItemId::Torch));
        assert!(state.messages.contains("Your torch burns out."));
    }
}
