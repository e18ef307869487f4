//! World state and its supporting stores
//!
//! The [`WorldState`] aggregate plus the flag store, message log, options,
//! sound cue plumbing, renderer snapshot and error types it relies on.

mod errors;
mod flags;
mod messages;
mod options;
mod snapshot;
mod sound;
mod state;

pub use errors::{AudioError, DialogueError, FlagError, HookError, MapError, OptionsError};
pub use flags::{FlagDuration, FlagScope, FlagStore};
pub use messages::{Message, MessageLog};
pub use options::{EconomyOptions, EngineOptions};
pub use snapshot::{DialogueView, Snapshot};
pub use sound::{AudioSink, SoundCue, flush_cues};
pub use state::{DebugShape, MenuState, Mode, WorldState};
