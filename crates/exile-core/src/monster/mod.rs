//! Entity model
//!
//! NPCs, enemies, pickups and fixtures are all [`Entity`] records; what they
//! do is decided entirely by their [`Behavior`] tag.

pub mod ai;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::dungeon::Position;
use crate::object::Inventory;

pub use ai::{AiAction, run_ai};

/// Unique identifier for entity instances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// The player always has id 0
    pub const PLAYER: EntityId = EntityId(0);
    /// Ids handed out to template entities before they are materialized
    pub const TEMPLATE: EntityId = EntityId(u32::MAX);

    pub fn next(self) -> Self {
        EntityId(self.0 + 1)
    }
}

/// What an entity does each turn and when interacted with
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Behavior {
    #[default]
    None,
    /// Random cardinal step
    Wander,
    /// Greedy x-then-y pursuit
    Chase,
    /// Drifts diagonally through walls, wrapping at map edges.
    /// Stays put only when every diagonal holds another occupant.
    Phase,
    /// Charges up to two steps when the player is near, then bites
    Charge,
    /// Asleep until woken by noise
    Dormant,
    /// Awake sleeper: one step per turn, then swipes
    AggressiveSlow,
    /// Buys meat for gold
    Vendor,
    /// Opens a shop session
    Shopkeeper,
    /// Open-once treasure
    Container,
    Signpost,
    /// Poses the riddle
    Sage,
    /// One-time gold pile
    GoldPickup,
    /// Spawner for wandering critters
    Hut,
}

impl Behavior {
    /// Behaviors the AI resolver moves
    pub const fn is_mobile(&self) -> bool {
        matches!(
            self,
            Behavior::Wander
                | Behavior::Chase
                | Behavior::Phase
                | Behavior::Charge
                | Behavior::Dormant
                | Behavior::AggressiveSlow
        )
    }
}

/// Disposition toward the player
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Neutral,
    Hostile,
    Ally,
}

bitflags! {
    /// Entity state bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct EntityFlags: u8 {
        /// The combat resolver may target this entity
        const ATTACKABLE = 1;
        /// Container opened / pickup consumed
        const OPENED = 1 << 1;
    }
}

/// A thing standing on the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub pos: Position,
    /// Display glyph
    pub glyph: char,
    pub name: String,
    pub description: String,
    pub behavior: Behavior,
    /// `None` for entities that cannot be hurt
    pub health: Option<i32>,
    pub inventory: Inventory,
    pub flags: EntityFlags,
    pub alignment: Alignment,
    /// Visual reference for the renderer
    pub sprite: Option<String>,
}

impl Entity {
    /// Template entity; it receives a real id when its map is loaded
    pub fn new(
        x: i32,
        y: i32,
        glyph: char,
        name: impl Into<String>,
        description: impl Into<String>,
        behavior: Behavior,
    ) -> Self {
        Self {
            id: EntityId::TEMPLATE,
            pos: Position::new(x, y),
            glyph,
            name: name.into(),
            description: description.into(),
            behavior,
            health: None,
            inventory: Inventory::new(),
            flags: EntityFlags::empty(),
            alignment: Alignment::Neutral,
            sprite: None,
        }
    }

    pub fn with_health(mut self, health: i32) -> Self {
        self.health = Some(health);
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn attackable(mut self) -> Self {
        self.flags.insert(EntityFlags::ATTACKABLE);
        self
    }

    pub fn with_sprite(mut self, sprite: impl Into<String>) -> Self {
        self.sprite = Some(sprite.into());
        self
    }

    /// Copy with a fresh identity, for runtime materialization
    pub fn instantiate(&self, id: EntityId) -> Self {
        let mut copy = self.clone();
        copy.id = id;
        copy
    }

    pub fn is_attackable(&self) -> bool {
        self.flags.contains(EntityFlags::ATTACKABLE)
    }

    pub fn is_opened(&self) -> bool {
        self.flags.contains(EntityFlags::OPENED)
    }

    pub fn mark_opened(&mut self) {
        self.flags.insert(EntityFlags::OPENED);
    }

    /// Open a container and show it as opened
    pub fn open_container(&mut self) {
        self.mark_opened();
        self.glyph = 'o';
        self.sprite = Some("chest_open".to_string());
    }

    /// Valid combat target: attackable and not an ally
    pub fn is_valid_target(&self) -> bool {
        self.is_attackable() && self.alignment != Alignment::Ally
    }
}
