//! Sparse map tiles
//!
//! A cell with no tile is open floor. A tile may block movement, and may carry
//! a semantic tag that step triggers and interaction look at.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Semantic tile tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TileTag {
    Wall,
    Torch,
    /// Noisy ground cover; stepping on it wakes dormant sleepers
    Leaves,
}

impl TileTag {
    /// Tags the interact command can act on
    pub const fn is_interactable(&self) -> bool {
        matches!(self, TileTag::Torch)
    }
}

/// One tile occupying a grid cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub name: String,
    /// Visual reference for the renderer
    pub sprite: Option<String>,
    pub collidable: bool,
    pub tag: Option<TileTag>,
}

impl Tile {
    pub fn wall() -> Self {
        Self {
            name: "Wall".to_string(),
            sprite: None,
            collidable: true,
            tag: Some(TileTag::Wall),
        }
    }

    /// Collidable non-wall cell (rock, pillar, statue base)
    pub fn solid() -> Self {
        Self {
            name: "Rock".to_string(),
            sprite: None,
            collidable: true,
            tag: None,
        }
    }

    pub fn torch() -> Self {
        Self {
            name: "Torch".to_string(),
            sprite: Some("torch".to_string()),
            collidable: true,
            tag: Some(TileTag::Torch),
        }
    }

    pub fn leaves() -> Self {
        Self {
            name: "Leaves".to_string(),
            sprite: Some("leaves".to_string()),
            collidable: false,
            tag: Some(TileTag::Leaves),
        }
    }
}
