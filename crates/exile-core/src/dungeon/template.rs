//! Map templates: authored, read-only map definitions
//!
//! Templates are registered once at start-up and never mutated by play. Every
//! per-playthrough change lives in the runtime copy or in flags; permanent
//! world changes are expressed as [`UnlockRule`]s keyed by a global flag and
//! re-derived on every load.

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::{Position, Tile, TileTag};
use crate::action::Direction;
use crate::monster::{Behavior, Entity};
use crate::object::ItemId;

/// Map identifiers
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MapId {
    #[default]
    StartArea,
    WoodsEntrance,
    ForestA,
    ForestB,
    ForestC,
    ForestD,
    BunnyArea,
    TownShop,
    RiddleRoom,
}

/// Coordinate-triggered map transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warp {
    pub target: MapId,
    pub spawn: Position,
    /// The player must be moving this way when landing on the cell
    pub exit: Option<Direction>,
}

impl Warp {
    pub const fn new(target: MapId, spawn: Position, exit: Option<Direction>) -> Self {
        Self {
            target,
            spawn,
            exit,
        }
    }

    /// Whether a move in `moving` onto this warp's cell fires it
    pub fn fires_for(&self, moving: Option<Direction>) -> bool {
        match self.exit {
            None => true,
            Some(required) => moving == Some(required),
        }
    }
}

/// Data-driven on-load mutation of the runtime map
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadEffect {
    /// Drop runtime entities with this behavior when the flag is set
    HideBehaviorIfFlag { behavior: Behavior, flag: String },
    /// Drop runtime entities with any of these names when the flag is set
    HideNamedIfFlag { names: Vec<String>, flag: String },
    /// Show named runtime entities as already opened when the flag is set
    MarkOpenedIfFlag { names: Vec<String>, flag: String },
    /// Place a tile on each cell, unless the flag is set
    PlaceTiles {
        tile: Tile,
        cells: Vec<Position>,
        unless_flag: Option<String>,
    },
}

/// Permanent change to a map, active once `flag` is set globally
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlockRule {
    pub flag: String,
    /// Cells whose walls are removed
    pub open: Vec<Position>,
    /// Warps added to the map
    pub warps: Vec<(Position, Warp)>,
    /// Logged when the unlock first happens
    pub message: String,
}

/// One-time pickup from a tagged tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRule {
    pub pos: Position,
    pub tag: TileTag,
    pub grant: ItemId,
    /// Global flag recording the pickup
    pub flag: String,
    pub message: String,
}

/// Author-defined map
#[derive(Debug, Clone)]
pub struct MapTemplate {
    pub id: MapId,
    pub name: String,
    pub width: i32,
    pub height: i32,
    pub walls: HashSet<Position>,
    /// Collidable cells that are not walls
    pub solids: HashSet<Position>,
    pub warps: HashMap<Position, Warp>,
    pub npcs: Vec<Entity>,
    pub enemies: Vec<Entity>,
    pub on_load: Vec<LoadEffect>,
    pub unlocks: Vec<UnlockRule>,
    pub tile_rules: Vec<TileRule>,
}

impl MapTemplate {
    /// Empty map with no walls
    pub fn new(id: MapId, name: impl Into<String>, width: i32, height: i32) -> Self {
        Self {
            id,
            name: name.into(),
            width,
            height,
            walls: HashSet::new(),
            solids: HashSet::new(),
            warps: HashMap::new(),
            npcs: Vec::new(),
            enemies: Vec::new(),
            on_load: Vec::new(),
            unlocks: Vec::new(),
            tile_rules: Vec::new(),
        }
    }

    /// Surround the map with a one-cell wall
    pub fn with_border(mut self) -> Self {
        for x in 0..self.width {
            self.walls.insert(Position::new(x, 0));
            self.walls.insert(Position::new(x, self.height - 1));
        }
        for y in 0..self.height {
            self.walls.insert(Position::new(0, y));
            self.walls.insert(Position::new(self.width - 1, y));
        }
        self
    }

    /// Knock a gate through the wall at `pos` and register its warp
    pub fn with_gate(mut self, pos: Position, warp: Warp) -> Self {
        self.walls.remove(&pos);
        self.warps.insert(pos, warp);
        self
    }

    pub fn with_npc(mut self, npc: Entity) -> Self {
        self.npcs.push(npc);
        self
    }

    pub fn with_enemy(mut self, enemy: Entity) -> Self {
        self.enemies.push(enemy);
        self
    }

    pub fn with_solid(mut self, pos: Position) -> Self {
        self.solids.insert(pos);
        self
    }

    pub fn with_on_load(mut self, effect: LoadEffect) -> Self {
        self.on_load.push(effect);
        self
    }

    pub fn with_unlock(mut self, rule: UnlockRule) -> Self {
        self.unlocks.push(rule);
        self
    }

    pub fn with_tile_rule(mut self, rule: TileRule) -> Self {
        self.tile_rules.push(rule);
        self
    }

    pub const fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    /// Middle cell of the map
    pub const fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    pub fn unlock_rule(&self, flag: &str) -> Option<&UnlockRule> {
        self.unlocks.iter().find(|rule| rule.flag == flag)
    }

    pub fn tile_rule(&self, pos: Position, tag: TileTag) -> Option<&TileRule> {
        self.tile_rules
            .iter()
            .find(|rule| rule.pos == pos && rule.tag == tag)
    }
}

/// All registered templates
#[derive(Debug, Clone, Default)]
pub struct MapRegistry {
    maps: HashMap<MapId, MapTemplate>,
}

impl MapRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a template
    pub fn register(&mut self, template: MapTemplate) {
        self.maps.insert(template.id, template);
    }

    pub fn get(&self, id: MapId) -> Option<&MapTemplate> {
        self.maps.get(&id)
    }

    pub fn contains(&self, id: MapId) -> bool {
        self.maps.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}
