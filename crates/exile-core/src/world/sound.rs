//! Audio cue requests
//!
//! The engine never plays anything itself. Resolvers queue named cues on the
//! world state; the game loop hands them to an [`AudioSink`] once the intent
//! has been fully resolved.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::errors::AudioError;

/// Named sound requests
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    Punch,
    Sword,
    Bow,
    Miss,
    Hurt,
    Purchase,
    Grunt,
    MenuMove,
    MenuSelect,
}

/// Something that can turn cues into sound
pub trait AudioSink {
    /// Play a cue. Failures are reported, never fatal.
    fn play(&mut self, cue: SoundCue) -> Result<(), AudioError>;
}

/// Hand every queued cue to the sink, logging (not propagating) failures.
///
/// Returns how many cues played successfully.
pub fn flush_cues(cues: &mut Vec<SoundCue>, sink: &mut dyn AudioSink) -> usize {
    let mut played = 0;
    for cue in cues.drain(..) {
        match sink.play(cue) {
            Ok(()) => played += 1,
            Err(err) => log::warn!("audio: {err}"),
        }
    }
    played
}
