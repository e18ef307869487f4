//! Dungeon/world geometry
//!
//! Grid coordinates, sparse tiles, authored map templates, the live map
//! runtime and the spawner economy.

mod economy;
mod maps;
mod runtime;
mod template;
mod tile;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use economy::{EconomyLedger, SpawnKind, tick_economy};
pub use runtime::{check_warp, load_map, process_step_triggers, unlock};
pub use template::{LoadEffect, MapId, MapRegistry, MapTemplate, TileRule, UnlockRule, Warp};
pub use tile::{Tile, TileTag};

/// Integer grid cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// King-move distance: max of the per-axis distances
    pub fn chebyshev(&self, other: Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    pub fn manhattan(&self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}
