//! Random number generation
//!
//! Uses a seeded ChaCha RNG so a whole run can be replayed from its seed.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seeded dice for the simulation.
///
/// Serializes as its bare seed; a restored generator replays its stream from
/// the beginning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub struct GameRng {
    seed: u64,
    stream: ChaCha8Rng,
}

impl From<u64> for GameRng {
    fn from(seed: u64) -> Self {
        Self {
            seed,
            stream: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl From<GameRng> for u64 {
    fn from(rng: GameRng) -> Self {
        rng.seed
    }
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self::from(seed)
    }

    /// Fresh run with an OS-drawn seed
    pub fn from_entropy() -> Self {
        Self::from(rand::random::<u64>())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform in `0..bound`; an empty range yields 0
    pub fn below(&mut self, bound: u32) -> u32 {
        match bound {
            0 => 0,
            _ => self.stream.gen_range(0..bound),
        }
    }

    /// Uniform in `-radius..=radius`
    pub fn spread(&mut self, radius: i32) -> i32 {
        match radius {
            r if r <= 0 => 0,
            r => self.stream.gen_range(-r..=r),
        }
    }

    /// A coin flip as -1 or +1
    pub fn sign(&mut self) -> i32 {
        if self.stream.gen_bool(0.5) { 1 } else { -1 }
    }

    /// Roll against a percentage
    pub fn percent(&mut self, chance: u32) -> bool {
        self.below(100) < chance
    }

    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.stream)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
