//! Spawner economy
//!
//! Hut entities occasionally release a wandering critter next to themselves.
//! Spawns are counted per kind over the whole run and stop at the cap.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::action::can_move;
use crate::monster::{Alignment, Behavior, Entity};
use crate::world::WorldState;

/// What a spawner produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SpawnKind {
    Bunny,
}

impl SpawnKind {
    fn entity(self, x: i32, y: i32) -> Entity {
        match self {
            SpawnKind::Bunny => Entity::new(x, y, 'b', "Bunny", "Harmless fluff", Behavior::Wander)
                .with_health(1)
                .with_alignment(Alignment::Neutral)
                .with_sprite("bunny")
                .attackable(),
        }
    }
}

/// Lifetime spawn counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EconomyLedger {
    spawned: HashMap<SpawnKind, u32>,
}

impl EconomyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawned(&self, kind: SpawnKind) -> u32 {
        self.spawned.get(&kind).copied().unwrap_or(0)
    }

    fn record(&mut self, kind: SpawnKind) {
        *self.spawned.entry(kind).or_insert(0) += 1;
    }
}

/// One economy pass: every spawner on the map may release one critter
pub fn tick_economy(state: &mut WorldState) {
    let huts: Vec<_> = state
        .npcs
        .iter()
        .filter(|npc| npc.behavior == Behavior::Hut)
        .map(|npc| npc.pos)
        .collect();
    let opts = state.options.economy.clone();
    let kind = SpawnKind::Bunny;

    for hut in huts {
        if !state.rng.percent(opts.spawn_percent) {
            continue;
        }
        if state.economy.spawned(kind) >= opts.population_cap {
            log::debug!("{kind} cap of {} reached", opts.population_cap);
            return;
        }
        for _ in 0..opts.spawn_attempts {
            let x = hut.x + state.rng.spread(opts.spawn_radius);
            let y = hut.y + state.rng.spread(opts.spawn_radius);
            if can_move(state, x, y, None) {
                state.spawn(kind.entity(x, y));
                state.economy.record(kind);
                break;
            }
        }
    }
}
