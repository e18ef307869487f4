//! Player action system
//!
//! Discrete intents fed in by a front end, plus the resolvers that act on the
//! grid directly: movement, interaction, item use and held-move repeat.

pub mod interact;
pub mod items;
pub mod movement;
pub mod repeat;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

pub use interact::handle_interact;
pub use items::{tick_timed_items, use_item};
pub use movement::{can_move, move_entity};
pub use repeat::MoveRepeat;

/// One accepted input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Step one cell
    Move(Direction),
    /// Melee with the punch action
    Attack,
    /// Interact, optionally preferring a direction
    Interact(Option<Direction>),
    OpenInventory,
    /// Number key 0-9: use the bound item, or bind in the inventory menu
    UseSlot(u8),
    MenuUp,
    MenuDown,
    Confirm,
    Cancel,
    ToggleHelp,
    ToggleLabels,
    /// Sell to / browse the adjacent trader
    Trade,
    /// Run modifier pressed or released
    SetRunning(bool),
}

/// Cardinal movement directions
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions in interaction scan order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Get the delta (dx, dy) for this direction
    pub const fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Dominant direction of an arbitrary offset; horizontal wins ties.
    pub fn primary(dx: i32, dy: i32) -> Option<Self> {
        if dx == 0 && dy == 0 {
            None
        } else if dx.abs() >= dy.abs() {
            Some(if dx > 0 { Direction::Right } else { Direction::Left })
        } else {
            Some(if dy > 0 { Direction::Down } else { Direction::Up })
        }
    }
}
