//! Engine options and configuration
//!
//! Options can be built in code, or loaded from a JSON file. Every field has a
//! default, so a partial file only overrides what it names.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::OptionsError;
use crate::dungeon::{MapId, Position};

/// Spawner tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyOptions {
    /// Chance per turn, per spawner, of attempting a spawn
    pub spawn_percent: u32,
    /// Spawn cells are picked within this many cells of the spawner on each axis
    pub spawn_radius: i32,
    /// Placement attempts before a spawn is abandoned for the turn
    pub spawn_attempts: u32,
    /// Lifetime limit per spawn kind over one run
    pub population_cap: u32,
}

impl Default for EconomyOptions {
    fn default() -> Self {
        Self {
            spawn_percent: 5,
            spawn_radius: 2,
            spawn_attempts: 10,
            population_cap: 40,
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// RNG seed; `None` draws one from entropy
    pub seed: Option<u64>,
    /// Message log capacity
    pub message_capacity: usize,
    /// Held-direction repeat interval
    pub move_repeat_interval_ms: u64,
    /// Map the player starts on
    pub start_map: MapId,
    /// Starting cell; `None` keeps the default centring rules
    pub start_position: Option<Position>,
    /// Starting (and maximum) player health
    pub player_health: i32,
    /// Mark warp cells as debug shapes on every load
    pub debug_overlays: bool,
    pub economy: EconomyOptions,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            seed: None,
            message_capacity: crate::MESSAGE_CAPACITY,
            move_repeat_interval_ms: crate::MOVE_REPEAT_INTERVAL_MS,
            start_map: MapId::StartArea,
            start_position: Some(Position::new(12, 10)),
            player_health: crate::PLAYER_START_HEALTH,
            debug_overlays: false,
            economy: EconomyOptions::default(),
        }
    }
}

impl EngineOptions {
    /// Load options from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, OptionsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_json(&contents)
    }

    /// Parse options from a JSON string
    pub fn parse_json(contents: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Builder-style seed override
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
