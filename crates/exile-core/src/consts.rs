//! Core tuning constants
//!
//! Damage numbers, rewards and durations shared by several resolvers.

/// Player starting health
pub const PLAYER_START_HEALTH: i32 = 20;

/// Default health for combat-capable template entities
pub const DEFAULT_ENTITY_HEALTH: i32 = 3;

/// Unarmed punch
pub const PUNCH_DAMAGE: i32 = 1;
pub const PUNCH_RANGE: i32 = 1;

/// Sword slash
pub const SWORD_DAMAGE: i32 = 3;
pub const SWORD_RANGE: i32 = 1;

/// Bow shot
pub const BOW_DAMAGE: i32 = 2;
pub const BOW_RANGE: i32 = 2;

/// Charging (pig-like) enemies notice the player within this Manhattan distance
pub const CHARGE_SIGHT: i32 = 10;
/// Steps a charging enemy takes per turn
pub const CHARGE_STEPS: usize = 2;
/// Bite damage dealt by a charging enemy
pub const CHARGE_BITE_DAMAGE: i32 = 1;
/// Swipe damage dealt by an awake slow-aggressive enemy
pub const SLOW_SWIPE_DAMAGE: i32 = 2;

/// Gold found in a treasure chest
pub const CHEST_GOLD: i32 = 10_000;
/// Gold in a one-time gold pile
pub const GOLD_PILE: i32 = 100;

/// Turns a freshly taken torch burns
pub const TORCH_DURATION: u32 = 1000;
/// Remaining-turn count at which a lit torch warns it is failing
pub const TORCH_WARNING: u32 = 100;

/// Number of bindable item slots (keys 1..9 and 0)
pub const SLOT_COUNT: usize = 10;

/// Default message log capacity
pub const MESSAGE_CAPACITY: usize = 100;

/// Default held-move repeat interval in milliseconds
pub const MOVE_REPEAT_INTERVAL_MS: u64 = 150;

/// Global flag: the sage's riddle has been answered
pub const RIDDLE_SOLVED_FLAG: &str = "start_area.riddle_solved";
/// Global flag: the start area's west gate is open
pub const WEST_GATE_FLAG: &str = "start_area.west_gate";
/// Global flag: the riddle room gold pile was collected
pub const GOLD_TAKEN_FLAG: &str = "riddle_room.gold_taken";
/// Global flag: the takeable riddle room torch was collected
pub const TORCH_TAKEN_FLAG: &str = "riddle_room.torch_taken";
/// Global flag: the forest pig is permanently dead
pub const PIG_DEAD_FLAG: &str = "forest_b.pig_dead";
/// Global flag: the forest bear is permanently dead
pub const BEAR_DEAD_FLAG: &str = "forest_c.bear_dead";
/// Global flag: the forest treasure chest has been opened
pub const CHEST_OPENED_FLAG: &str = "forest_c.chest_opened";
