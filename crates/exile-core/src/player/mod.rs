//! Player character
//!
//! The player is a distinguished entity: it always has id 0, carries gold and
//! an action table, and its inventory is the owned-items ledger.

use serde::{Deserialize, Serialize};

use crate::dungeon::Position;
use crate::object::Inventory;
use crate::world::SoundCue;
use crate::{PLAYER_START_HEALTH, PUNCH_DAMAGE, PUNCH_RANGE};

/// A named attack the player knows without any item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackSpec {
    /// Table key, e.g. "punch"
    pub key: String,
    /// Name used in combat messages
    pub name: String,
    pub damage: i32,
    /// Reach on each axis
    pub range: i32,
    pub cue: SoundCue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Position,
    pub glyph: char,
    pub name: String,
    pub description: String,
    pub health: i32,
    pub max_health: i32,
    pub gold: i32,
    pub actions: Vec<AttackSpec>,
    /// Owned items
    pub inventory: Inventory,
}

impl Player {
    pub fn new(health: i32) -> Self {
        Self {
            pos: Position::default(),
            glyph: '@',
            name: "The Chrono Exile".to_string(),
            description: "Bearer of temporal shards".to_string(),
            health,
            max_health: health,
            gold: 0,
            actions: vec![AttackSpec {
                key: "punch".to_string(),
                name: "Punch".to_string(),
                damage: PUNCH_DAMAGE,
                range: PUNCH_RANGE,
                cue: SoundCue::Punch,
            }],
            inventory: Inventory::new(),
        }
    }

    pub fn action(&self, key: &str) -> Option<&AttackSpec> {
        self.actions.iter().find(|a| a.key == key)
    }

    pub const fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PLAYER_START_HEALTH)
    }
}
