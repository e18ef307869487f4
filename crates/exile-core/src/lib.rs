//! exile-core: turn-resolution and world-state engine for the Chrono Exile
//!
//! This crate contains all simulation logic with no terminal or rendering I/O.
//! A front end feeds discrete [`action::Intent`]s into a [`GameLoop`] and reads
//! back a [`world::Snapshot`] plus any requested [`world::SoundCue`]s.
//!
//! Everything runs single-threaded: one intent is resolved to completion
//! (movement, triggers, AI, economy, warps, flags, timed items) before the
//! next one is accepted.

pub mod action;
pub mod combat;
pub mod dungeon;
pub mod monster;
pub mod object;
pub mod player;
pub mod special;
pub mod world;

mod consts;
mod gameloop;
mod rng;

#[cfg(test)]
mod test_support;

pub use consts::*;
pub use gameloop::{GameLoop, LoopResult};
pub use rng::GameRng;
pub use world::{Mode, WorldState};
