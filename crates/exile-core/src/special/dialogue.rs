//! Dialogue trees
//!
//! A session is a (tree, node) pointer plus the option selection index kept
//! in the menu state. Confirming an option may run a named action against the
//! world, then moves to the option's next node; reaching a terminal node ends
//! the session.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::dungeon::{MapId, unlock};
use crate::world::{DialogueError, FlagScope, Mode, SoundCue, WorldState};
use crate::{RIDDLE_SOLVED_FLAG, WEST_GATE_FLAG};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueOption {
    pub label: String,
    #[serde(default)]
    pub next: Option<String>,
    /// Side effect run when the option is confirmed
    #[serde(default)]
    pub action: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueNode {
    pub text: String,
    #[serde(default)]
    pub options: Vec<DialogueOption>,
    /// Reaching this node ends the conversation
    #[serde(default)]
    pub end: bool,
}

fn default_backoutable() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueTree {
    pub start: String,
    /// Whether cancel may leave the conversation early
    #[serde(default = "default_backoutable")]
    pub backoutable: bool,
    pub nodes: HashMap<String, DialogueNode>,
}

/// All dialogue trees by id
pub type DialogueBook = HashMap<String, DialogueTree>;

/// Where the current conversation is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueSession {
    pub tree: String,
    pub node: String,
}

/// Side effects dialogue options can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum DialogueAction {
    /// Solve the sage's riddle: open the start area's west gate
    OpenStartLeftPath,
}

fn option(label: &str, next: Option<&str>, action: Option<&str>) -> DialogueOption {
    DialogueOption {
        label: label.to_string(),
        next: next.map(str::to_string),
        action: action.map(str::to_string),
    }
}

fn node(text: &str, options: Vec<DialogueOption>, end: bool) -> DialogueNode {
    DialogueNode {
        text: text.to_string(),
        options,
        end,
    }
}

/// The dialogue every run starts with
pub fn initial_dialogues() -> DialogueBook {
    let mut nodes = HashMap::new();
    nodes.insert(
        "q1".to_string(),
        node(
            "I speak without a mouth and hear without ears. What am I?",
            vec![
                option("Echo", Some("q2"), None),
                option("Wind", Some("wrong"), None),
                option("Silence", Some("wrong"), None),
            ],
            false,
        ),
    );
    nodes.insert(
        "q2".to_string(),
        node(
            "What has to be broken before you can use it?",
            vec![
                option("Egg", Some("end"), Some("open_start_left_path")),
                option("Seal", Some("wrong"), None),
                option("Promise", Some("wrong"), None),
            ],
            false,
        ),
    );
    nodes.insert(
        "wrong".to_string(),
        node(
            "Incorrect. Think again.",
            vec![option("Back", Some("q1"), None)],
            false,
        ),
    );
    nodes.insert(
        "end".to_string(),
        node("Well done. The path to the west opens.", Vec::new(), true),
    );

    let mut book = DialogueBook::new();
    book.insert(
        "riddle1".to_string(),
        DialogueTree {
            start: "q1".to_string(),
            backoutable: true,
            nodes,
        },
    );
    book
}

/// Start a conversation at the tree's start node
pub fn start_dialogue(state: &mut WorldState, tree_id: &str) -> Result<(), DialogueError> {
    let tree = state
        .dialogues
        .get(tree_id)
        .ok_or_else(|| DialogueError::UnknownTree(tree_id.to_string()))?;
    if !tree.nodes.contains_key(&tree.start) {
        return Err(DialogueError::UnknownNode {
            tree: tree_id.to_string(),
            node: tree.start.clone(),
        });
    }
    state.dialogue = Some(DialogueSession {
        tree: tree_id.to_string(),
        node: tree.start.clone(),
    });
    state.menu.dialogue = 0;
    state.mode = Mode::Dialogue;
    Ok(())
}

/// Node the session currently points at
pub fn current_node(state: &WorldState) -> Option<&DialogueNode> {
    let session = state.dialogue.as_ref()?;
    state.dialogues.get(&session.tree)?.nodes.get(&session.node)
}

fn end_session(state: &mut WorldState) {
    state.dialogue = None;
    state.menu.dialogue = 0;
    state.mode = Mode::Playing;
}

/// Run a named dialogue side effect; unknown ids are reported, not fatal
pub fn perform_action(state: &mut WorldState, action_id: &str) {
    let Ok(action) = action_id.parse::<DialogueAction>() else {
        log::debug!("unknown dialogue action '{action_id}'");
        state.message(format!("[debug] Unknown action: {action_id}"));
        return;
    };
    match action {
        DialogueAction::OpenStartLeftPath => {
            state.flags.set(RIDDLE_SOLVED_FLAG, FlagScope::Global, None);
            if let Err(err) = unlock(state, MapId::StartArea, WEST_GATE_FLAG) {
                log::warn!("dialogue action {action}: {err}");
            }
        }
    }
}

/// Move the selection, wrapping around the option list
pub fn navigate(state: &mut WorldState, delta: i32) {
    let Some(count) = current_node(state).map(|n| n.options.len()) else {
        return;
    };
    if count == 0 {
        return;
    }
    let current = state.menu.dialogue;
    let next = (current as i64 + delta as i64).rem_euclid(count as i64) as usize;
    if next != current {
        state.menu.dialogue = next;
        state.request_cue(SoundCue::MenuMove);
    }
}

/// Confirm the selected option
pub fn confirm(state: &mut WorldState) {
    let Some(node) = current_node(state) else {
        end_session(state);
        return;
    };
    let Some(choice) = node.options.get(state.menu.dialogue).cloned() else {
        return;
    };

    state.request_cue(SoundCue::MenuSelect);
    if let Some(action) = &choice.action {
        perform_action(state, action);
    }
    let Some(next) = choice.next else {
        return;
    };
    let Some(session) = state.dialogue.as_mut() else {
        return;
    };
    session.node = next;
    state.menu.dialogue = 0;

    match current_node(state).map(|n| n.end) {
        Some(true) => end_session(state),
        Some(false) => {}
        None => {
            if let Some(session) = &state.dialogue {
                let err = DialogueError::UnknownNode {
                    tree: session.tree.clone(),
                    node: session.node.clone(),
                };
                log::warn!("{err}");
            }
            end_session(state);
        }
    }
}

/// Leave early, if the tree allows it
pub fn cancel(state: &mut WorldState) {
    let backoutable = state
        .dialogue
        .as_ref()
        .and_then(|s| state.dialogues.get(&s.tree))
        .is_none_or(|tree| tree.backoutable);
    if backoutable {
        end_session(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Position;
    use crate::test_support::world_on;

    fn in_riddle() -> WorldState {
        let mut state = world_on(MapId::StartArea, Position::new(9, 8));
        start_dialogue(&mut state, "riddle1").unwrap();
        state
    }

    #[test]
    fn test_unknown_tree() {
        let mut state = world_on(MapId::StartArea, Position::new(9, 8));
        assert_eq!(
            start_dialogue(&mut state, "nope"),
            Err(DialogueError::UnknownTree("nope".to_string()))
        );
        assert_eq!(state.mode, Mode::Playing);
    }

    #[test]
    fn test_wrong_answer_loops_back() {
        let mut state = in_riddle();
        navigate(&mut state, 1);
        confirm(&mut state);
        assert_eq!(current_node(&state).unwrap().text, "Incorrect. Think again.");
        confirm(&mut state);
        assert_eq!(state.dialogue.as_ref().unwrap().node, "q1");
        assert_eq!(state.menu.dialogue, 0);
    }

    #[test]
    fn test_selection_wraps() {
        let mut state = in_riddle();
        navigate(&mut state, -1);
        assert_eq!(state.menu.dialogue, 2);
        navigate(&mut state, 1);
        assert_eq!(state.menu.dialogue, 0);
    }

    #[test]
    fn test_single_option_node_moves_silently() {
        let mut state = in_riddle();
        state.cues.clear();
        navigate(&mut state, 1);
        assert_eq!(state.cues, vec![SoundCue::MenuMove]);

        confirm(&mut state);
        state.cues.clear();
        navigate(&mut state, 1);
        navigate(&mut state, -1);
        assert_eq!(state.menu.dialogue, 0);
        assert!(state.cues.is_empty());
    }

    #[test]
    fn test_solving_opens_west_gate() {
        let mut state = in_riddle();
        confirm(&mut state); // Echo
        confirm(&mut state); // Egg
        assert_eq!(state.mode, Mode::Playing);
        assert!(state.dialogue.is_none());
        assert!(state.flags.has(RIDDLE_SOLVED_FLAG));
        assert!(state.flags.has(WEST_GATE_FLAG));
        assert!(state.warps.contains_key(&Position::new(0, 8)));
        assert!(!state.tiles.contains_key(&Position::new(0, 8)));
    }

    #[test]
    fn test_cancel_respects_backoutable() {
        let mut state = in_riddle();
        cancel(&mut state);
        assert_eq!(state.mode, Mode::Playing);

        let mut state = in_riddle();
        if let Some(tree) = state.dialogues.get_mut("riddle1") {
            tree.backoutable = false;
        }
        cancel(&mut state);
        assert_eq!(state.mode, Mode::Dialogue);
    }

    #[test]
    fn test_unknown_action_is_logged() {
        let mut state = world_on(MapId::StartArea, Position::new(9, 8));
        perform_action(&mut state, "summon_dragon");
        assert!(state.messages.contains("[debug] Unknown action: summon_dragon"));
    }

    #[test]
    fn test_tree_from_json() {
        let tree: DialogueTree = serde_json::from_str(
            r#"{ "start": "a", "nodes": { "a": { "text": "Hi", "options": [ { "label": "Bye" } ] } } }"#,
        )
        .unwrap();
        assert!(tree.backoutable);
        assert!(!tree.nodes["a"].end);
        assert_eq!(tree.nodes["a"].options[0].next, None);
    }
}
