//! Combat resolution
//!
//! One attack hits one target: the first valid entity in list order that is
//! within range on both axes. Damage to the player lives here too, since it
//! owns the transition into the dead mode.

use crate::object::ItemId;
use crate::world::{FlagScope, Mode, SoundCue, WorldState};
use crate::{BEAR_DEAD_FLAG, DEFAULT_ENTITY_HEALTH, PIG_DEAD_FLAG};

/// What killing a named entity yields: a resource, and optionally a global
/// flag recording the death for good.
fn kill_reward(name: &str) -> Option<(ItemId, Option<&'static str>)> {
    match name {
        "Bunny" => Some((ItemId::RabbitCorpse, None)),
        "Pig" => Some((ItemId::PigCarcass, Some(PIG_DEAD_FLAG))),
        "Bear" => Some((ItemId::BearPelt, Some(BEAR_DEAD_FLAG))),
        _ => None,
    }
}

/// Resolve one player attack
pub fn attack(state: &mut WorldState, name: &str, damage: i32, range: i32, cue: SoundCue) {
    let origin = state.player.pos;
    let target = state.npcs.iter().position(|npc| {
        npc.is_valid_target()
            && (npc.pos.x - origin.x).abs() <= range
            && (npc.pos.y - origin.y).abs() <= range
    });

    let Some(idx) = target else {
        state.request_cue(SoundCue::Miss);
        state.message(format!("No target in range for {name}."));
        return;
    };

    let npc = &mut state.npcs[idx];
    let health = npc.health.unwrap_or(DEFAULT_ENTITY_HEALTH) - damage;
    npc.health = Some(health);
    let target_name = npc.name.clone();

    state.request_cue(cue);
    state.message(format!(
        "You used {name} on {target_name} for {damage} damage!"
    ));

    if health <= 0 {
        state.npcs.remove(idx);
        state.message(format!("You killed the {target_name}!"));
        if let Some((item, flag)) = kill_reward(&target_name) {
            state.player.inventory.add(item, 1);
            state.message(format!("You collected a {}.", item.name()));
            if let Some(flag) = flag {
                state.flags.set(flag, FlagScope::Global, None);
            }
        }
    }
}

/// Punch with the player's own action table entry
pub fn punch(state: &mut WorldState) {
    let Some(action) = state.player.action("punch").cloned() else {
        log::debug!("player has no punch action");
        return;
    };
    attack(state, &action.name, action.damage, action.range, action.cue);
}

/// Hurt the player, entering the dead mode at zero health
pub fn damage_player(state: &mut WorldState, amount: i32, source: &str) {
    if state.mode == Mode::Dead {
        return;
    }
    let dmg = amount.max(0);
    state.player.health -= dmg;
    state.request_cue(SoundCue::Hurt);
    state.message(format!("{source} hits you for {dmg}!"));

    if state.player.is_dead() {
        state.message("You have died...");
        state.mode = Mode::Dead;
        state.repeat.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::{MapId, Position};
    use crate::monster::{Alignment, Behavior, Entity};
    use crate::test_support::world_on;

    fn pig(x: i32, y: i32, health: i32) -> Entity {
        Entity::new(x, y, 'p', "Pig", "Charges if close", Behavior::Charge)
            .with_health(health)
            .with_alignment(Alignment::Hostile)
            .attackable()
    }

    #[test]
    fn test_lethal_hit_removes_and_rewards() {
        let mut state = world_on(MapId::ForestA, Position::new(5, 5));
        state.spawn(pig(6, 5, 3));
        attack(&mut state, "Sword Slash", 3, 1, SoundCue::Sword);

        assert!(state.npcs.is_empty());
        assert!(state.messages.contains("You killed the Pig!"));
        assert_eq!(state.player.inventory.count(ItemId::PigCarcass), 1);
        assert!(state.flags.has(PIG_DEAD_FLAG));
        assert_eq!(state.cues, vec![SoundCue::Sword]);
    }

    #[test]
    fn test_first_in_list_not_nearest() {
        let mut state = world_on(MapId::ForestA, Position::new(5, 5));
        state.spawn(pig(7, 7, 3));
        state.spawn(pig(6, 5, 3));
        attack(&mut state, "Bow Shot", 2, 2, SoundCue::Bow);
        assert_eq!(state.npcs[0].health, Some(1));
        assert_eq!(state.npcs[1].health, Some(3));
    }

    #[test]
    fn test_miss_and_allies_ignored() {
        let mut state = world_on(MapId::ForestA, Position::new(5, 5));
        state.spawn(pig(6, 5, 3).with_alignment(Alignment::Ally));
        state.spawn(pig(9, 5, 3));
        punch(&mut state);
        assert!(state.messages.contains("No target in range for Punch."));
        assert_eq!(state.cues, vec![SoundCue::Miss]);
    }

    #[test]
    fn test_missing_health_uses_default() {
        let mut state = world_on(MapId::ForestA, Position::new(5, 5));
        state.spawn(Entity::new(5, 6, 'x', "Dummy", "", Behavior::None).attackable());
        punch(&mut state);
        assert_eq!(state.npcs[0].health, Some(DEFAULT_ENTITY_HEALTH - 1));
    }

    #[test]
    fn test_death_enters_dead_mode_once() {
        let mut state = world_on(MapId::ForestA, Position::new(5, 5));
        state.player.health = 1;
        damage_player(&mut state, 2, "Bear swipe");
        assert_eq!(state.mode, Mode::Dead);
        assert!(state.messages.contains("Bear swipe hits you for 2!"));
        assert!(state.messages.contains("You have died..."));

        let logged = state.messages.len();
        damage_player(&mut state, 2, "Bear swipe");
        assert_eq!(state.messages.len(), logged);
        assert_eq!(state.player.health, -1);
    }
}
