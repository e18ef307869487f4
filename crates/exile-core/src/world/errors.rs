//! Error types for recoverable engine faults
//!
//! None of these ever abort a session. Callers log them and carry on; the
//! variants exist so the log says exactly what went wrong.

use thiserror::Error;

use crate::dungeon::{MapId, Position};
use crate::world::SoundCue;

/// Flag store rejections
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlagError {
    #[error("unknown flag scope '{0}' (expected 'global' or 'map')")]
    UnknownScope(String),
}

/// Map loading failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("no template registered for map '{0}'")]
    UnknownMap(MapId),

    #[error("map '{map}' has no unlock rule for flag '{flag}'")]
    UnknownUnlock { map: MapId, flag: String },
}

/// On-load effect failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HookError {
    #[error("on-load effect for '{map}' targets {pos} outside a {width}x{height} map")]
    OutOfBounds {
        map: MapId,
        pos: Position,
        width: i32,
        height: i32,
    },
}

/// Audio collaborator failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    #[error("no sound loaded for cue '{0}'")]
    Missing(SoundCue),

    #[error("playback of '{cue}' failed: {reason}")]
    Playback { cue: SoundCue, reason: String },
}

/// Dialogue session failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DialogueError {
    #[error("no dialogue tree named '{0}'")]
    UnknownTree(String),

    #[error("dialogue tree '{tree}' has no node '{node}'")]
    UnknownNode { tree: String, node: String },
}

/// Options loading failures
#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("could not read options file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid options JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = FlagError::UnknownScope("level".to_string());
        assert_eq!(
            err.to_string(),
            "unknown flag scope 'level' (expected 'global' or 'map')"
        );

        let err = MapError::UnknownMap(MapId::RiddleRoom);
        assert_eq!(err.to_string(), "no template registered for map 'riddle_room'");

        let err = HookError::OutOfBounds {
            map: MapId::ForestC,
            pos: Position::new(30, 2),
            width: 24,
            height: 16,
        };
        assert!(err.to_string().contains("(30, 2)"));
    }
}
