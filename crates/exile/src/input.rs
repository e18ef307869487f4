//! Text commands to intents
//!
//! One command per line. Blank lines and `#` comments are skipped by the
//! caller. Keyboard-style aliases (`w`, `a`, `s`, `d`, `e`, `i`) are accepted
//! next to the long forms.

use std::str::FromStr;

use exile_core::Mode;
use exile_core::action::{Direction, Intent};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("bad direction: {0}")]
    Direction(String),
    #[error("slot must be 0-9, got {0}")]
    Slot(String),
    #[error("expected on/off, got {0}")]
    Toggle(String),
    #[error("{0} needs an argument")]
    Missing(&'static str),
}

fn direction(word: &str) -> Result<Direction, ParseError> {
    match word {
        "w" => Ok(Direction::Up),
        "s" => Ok(Direction::Down),
        "a" => Ok(Direction::Left),
        "d" => Ok(Direction::Right),
        _ => Direction::from_str(word).map_err(|_| ParseError::Direction(word.to_string())),
    }
}

fn slot(word: &str) -> Result<u8, ParseError> {
    match word.parse::<u8>() {
        Ok(n) if n <= 9 => Ok(n),
        _ => Err(ParseError::Slot(word.to_string())),
    }
}

/// Parse one command line
pub fn parse_intent(line: &str) -> Result<Intent, ParseError> {
    let lower = line.trim().to_ascii_lowercase();
    let mut words = lower.split_whitespace();
    let Some(head) = words.next() else {
        return Err(ParseError::Unknown(String::new()));
    };
    let arg = words.next();

    let intent = match head {
        "move" | "go" => {
            let word = arg.ok_or(ParseError::Missing("move"))?;
            Intent::Move(direction(word)?)
        }
        "up" | "down" | "left" | "right" | "w" | "a" | "s" | "d" => Intent::Move(direction(head)?),
        "attack" | "punch" | "p" => Intent::Attack,
        "interact" | "e" => Intent::Interact(arg.map(direction).transpose()?),
        "inventory" | "inv" | "i" => Intent::OpenInventory,
        "use" | "slot" => Intent::UseSlot(slot(arg.ok_or(ParseError::Missing("use"))?)?),
        "menu-up" | "prev" => Intent::MenuUp,
        "menu-down" | "next" => Intent::MenuDown,
        "confirm" | "enter" | "ok" => Intent::Confirm,
        "cancel" | "esc" | "back" => Intent::Cancel,
        "help" | "h" => Intent::ToggleHelp,
        "labels" | "l" => Intent::ToggleLabels,
        "trade" | "t" => Intent::Trade,
        "run" => match arg {
            Some("on") | None => Intent::SetRunning(true),
            Some("off") => Intent::SetRunning(false),
            Some(other) => return Err(ParseError::Toggle(other.to_string())),
        },
        _ if head.len() == 1 && head.as_bytes()[0].is_ascii_digit() => Intent::UseSlot(slot(head)?),
        _ => return Err(ParseError::Unknown(head.to_string())),
    };
    Ok(intent)
}

/// Vertical moves navigate whatever menu is open
pub fn for_mode(intent: Intent, mode: Mode) -> Intent {
    match (mode, intent) {
        (Mode::Playing | Mode::Dead, _) => intent,
        (_, Intent::Move(Direction::Up)) => Intent::MenuUp,
        (_, Intent::Move(Direction::Down)) => Intent::MenuDown,
        _ => intent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_forms() {
        assert_eq!(parse_intent("move left"), Ok(Intent::Move(Direction::Left)));
        assert_eq!(parse_intent("  Up "), Ok(Intent::Move(Direction::Up)));
        assert_eq!(parse_intent("d"), Ok(Intent::Move(Direction::Right)));
        assert_eq!(
            parse_intent("move sideways"),
            Err(ParseError::Direction("sideways".into()))
        );
        assert_eq!(parse_intent("move"), Err(ParseError::Missing("move")));
    }

    #[test]
    fn test_interact_direction_is_optional() {
        assert_eq!(parse_intent("interact"), Ok(Intent::Interact(None)));
        assert_eq!(
            parse_intent("e down"),
            Ok(Intent::Interact(Some(Direction::Down)))
        );
    }

    #[test]
    fn test_slots() {
        assert_eq!(parse_intent("use 3"), Ok(Intent::UseSlot(3)));
        assert_eq!(parse_intent("0"), Ok(Intent::UseSlot(0)));
        assert_eq!(parse_intent("use 12"), Err(ParseError::Slot("12".into())));
    }

    #[test]
    fn test_run_toggle() {
        assert_eq!(parse_intent("run"), Ok(Intent::SetRunning(true)));
        assert_eq!(parse_intent("run off"), Ok(Intent::SetRunning(false)));
        assert!(matches!(parse_intent("run maybe"), Err(ParseError::Toggle(_))));
    }

    #[test]
    fn test_menu_and_toggles() {
        assert_eq!(parse_intent("confirm"), Ok(Intent::Confirm));
        assert_eq!(parse_intent("esc"), Ok(Intent::Cancel));
        assert_eq!(parse_intent("next"), Ok(Intent::MenuDown));
        assert_eq!(parse_intent("labels"), Ok(Intent::ToggleLabels));
        assert_eq!(parse_intent("dance"), Err(ParseError::Unknown("dance".into())));
    }

    #[test]
    fn test_arrows_navigate_menus() {
        let up = Intent::Move(Direction::Up);
        assert_eq!(for_mode(up, Mode::MainMenu), Intent::MenuUp);
        assert_eq!(for_mode(Intent::Move(Direction::Down), Mode::Shop), Intent::MenuDown);
        assert_eq!(for_mode(up, Mode::Playing), up);
        assert_eq!(for_mode(Intent::Move(Direction::Left), Mode::Dialogue), Intent::Move(Direction::Left));
    }
}
