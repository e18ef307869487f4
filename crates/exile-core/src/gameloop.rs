//! Game loop: mode state machine and turn pipeline
//!
//! Each accepted intent is routed to the handler of the current mode and
//! resolved to completion before the next one is taken. A move that succeeds
//! runs the full turn: step triggers, AI, economy, warps, flag countdown and
//! timed items, in that order. A move that fails does nothing at all.

use crate::SLOT_COUNT;
use crate::action::{Direction, Intent, handle_interact, move_entity, tick_timed_items, use_item};
use crate::combat::punch;
use crate::dungeon::{check_warp, process_step_triggers, tick_economy};
use crate::monster::{EntityId, run_ai};
use crate::special::{dialogue, handle_commerce, purchase};
use crate::world::{AudioSink, Mode, SoundCue, WorldState, flush_cues};

/// Main menu entries, top to bottom
const MAIN_MENU: [&str; 3] = ["Play", "Settings", "Quit"];

/// Settings screen entries
const SETTINGS_MENU: [&str; 1] = ["Back"];

/// What the front end should do after an intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopResult {
    Continue,
    /// The player chose Quit on the main menu
    Quit,
}

/// Step a wrapping menu selection; returns the new index
fn wrap_index(index: usize, len: usize, delta: i32) -> usize {
    if len == 0 {
        return 0;
    }
    (index as i64 + delta as i64).rem_euclid(len as i64) as usize
}

/// Move a menu selection, cueing only if it actually changed
fn navigate(state: &mut WorldState, index: usize, len: usize, delta: i32) -> usize {
    let next = wrap_index(index, len, delta);
    if next != index {
        state.request_cue(SoundCue::MenuMove);
    }
    next
}

/// Game loop controller
pub struct GameLoop {
    state: WorldState,
    sink: Option<Box<dyn AudioSink>>,
    /// Time of the latest intent, for held-move repeat
    clock_ms: u64,
}

impl GameLoop {
    pub fn new(state: WorldState) -> Self {
        Self {
            state,
            sink: None,
            clock_ms: 0,
        }
    }

    /// Attach an audio collaborator
    pub fn with_sink(mut self, sink: Box<dyn AudioSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn state(&self) -> &WorldState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut WorldState {
        &mut self.state
    }

    /// Resolve one intent against the current mode
    pub fn handle(&mut self, intent: Intent) -> LoopResult {
        let result = match self.state.mode {
            Mode::MainMenu => self.main_menu(intent),
            Mode::Settings => {
                self.settings(intent);
                LoopResult::Continue
            }
            Mode::Playing => {
                self.playing(intent);
                LoopResult::Continue
            }
            Mode::Shop => {
                self.shop(intent);
                LoopResult::Continue
            }
            Mode::Inventory => {
                self.inventory(intent);
                LoopResult::Continue
            }
            Mode::Dialogue => {
                self.dialogue(intent);
                LoopResult::Continue
            }
            Mode::Dead => {
                self.dead(intent);
                LoopResult::Continue
            }
        };
        self.finish(result)
    }

    /// Held-direction repeat: call every frame with whatever is held
    pub fn poll_held(&mut self, held: Option<Direction>, now_ms: u64) -> LoopResult {
        self.clock_ms = now_ms;
        if self.state.mode != Mode::Playing {
            return LoopResult::Continue;
        }
        if let Some(dir) = self.state.repeat.poll(held, now_ms) {
            self.step(dir);
        }
        self.finish(LoopResult::Continue)
    }

    /// Hand queued cues to the sink, or drop them
    fn finish(&mut self, result: LoopResult) -> LoopResult {
        match self.sink.as_deref_mut() {
            Some(sink) => {
                flush_cues(&mut self.state.cues, sink);
            }
            None => self.state.cues.clear(),
        }
        result
    }

    /// The turn pipeline. Returns whether the move was accepted.
    fn step(&mut self, dir: Direction) -> bool {
        let state = &mut self.state;
        let (dx, dy) = dir.delta();
        if !move_entity(state, EntityId::PLAYER, dx, dy) {
            return false;
        }

        state.turn += 1;
        process_step_triggers(state);
        run_ai(state);
        tick_economy(state);
        if let Err(err) = check_warp(state, Some(dir)) {
            log::warn!("warp failed: {err}");
        }
        state.flags.tick();
        tick_timed_items(state);

        if state.mode == Mode::Playing {
            state.repeat.record(dir, self.clock_ms);
        }
        true
    }

    fn main_menu(&mut self, intent: Intent) -> LoopResult {
        let state = &mut self.state;
        let current = state.menu.main;
        match intent {
            Intent::MenuUp => state.menu.main = navigate(state, current, MAIN_MENU.len(), -1),
            Intent::MenuDown => state.menu.main = navigate(state, current, MAIN_MENU.len(), 1),
            Intent::Confirm => {
                state.request_cue(SoundCue::MenuSelect);
                match state.menu.main {
                    0 => state.mode = Mode::Playing,
                    1 => state.mode = Mode::Settings,
                    _ => return LoopResult::Quit,
                }
            }
            _ => {}
        }
        LoopResult::Continue
    }

    fn settings(&mut self, intent: Intent) {
        let state = &mut self.state;
        match intent {
            Intent::MenuUp => {
                navigate(state, 0, SETTINGS_MENU.len(), -1);
            }
            Intent::MenuDown => {
                navigate(state, 0, SETTINGS_MENU.len(), 1);
            }
            Intent::Confirm | Intent::Cancel => {
                state.request_cue(SoundCue::MenuSelect);
                state.mode = Mode::MainMenu;
            }
            _ => {}
        }
    }

    fn playing(&mut self, intent: Intent) {
        match intent {
            Intent::Move(dir) => {
                self.state.last_dir = Some(dir);
                self.step(dir);
            }
            Intent::Attack => punch(&mut self.state),
            Intent::Interact(preferred) => {
                let preferred = preferred.or(self.state.last_dir);
                handle_interact(&mut self.state, preferred);
            }
            Intent::UseSlot(slot) => {
                let bound = self.state.binds.get(usize::from(slot)).copied().flatten();
                if let Some(item) = bound {
                    use_item(&mut self.state, item);
                }
            }
            Intent::Trade => handle_commerce(&mut self.state),
            Intent::SetRunning(running) => {
                let state = &mut self.state;
                if running != state.repeat.is_running() {
                    state.repeat.set_running(running);
                    state.message(if running {
                        "Hero begins running."
                    } else {
                        "Hero stops running."
                    });
                }
            }
            Intent::OpenInventory => self.open_inventory(),
            Intent::ToggleHelp => self.state.show_help = !self.state.show_help,
            Intent::ToggleLabels => self.state.show_labels = !self.state.show_labels,
            Intent::MenuUp | Intent::MenuDown | Intent::Confirm | Intent::Cancel => {}
        }
    }

    fn open_inventory(&mut self) {
        self.state.menu.inventory = 0;
        self.state.mode = Mode::Inventory;
    }

    fn shop(&mut self, intent: Intent) {
        let state = &mut self.state;
        let len = state.active_shop.map_or(0, |id| state.shops.items(id).len());
        let current = state.menu.shop;
        match intent {
            Intent::Cancel => {
                state.active_shop = None;
                state.mode = Mode::Playing;
            }
            _ if len == 0 => {}
            Intent::MenuUp => state.menu.shop = navigate(state, current, len, -1),
            Intent::MenuDown => state.menu.shop = navigate(state, current, len, 1),
            Intent::Confirm => {
                purchase(state);
            }
            _ => {}
        }
    }

    fn inventory(&mut self, intent: Intent) {
        let state = &mut self.state;
        let items = state.player.inventory.ids();
        let current = state.menu.inventory;
        match intent {
            Intent::MenuUp if !items.is_empty() => {
                state.menu.inventory = navigate(state, current, items.len(), -1);
            }
            Intent::MenuDown if !items.is_empty() => {
                state.menu.inventory = navigate(state, current, items.len(), 1);
            }
            Intent::UseSlot(slot) if usize::from(slot) < SLOT_COUNT => {
                let Some(item) = items.get(current).copied() else {
                    return;
                };
                state.binds[usize::from(slot)] = Some(item);
                state.message(format!("Bound {} to [{slot}].", item.name()));
                state.request_cue(SoundCue::MenuSelect);
            }
            Intent::Cancel | Intent::OpenInventory => {
                state.mode = if state.player.is_dead() {
                    Mode::Dead
                } else {
                    Mode::Playing
                };
            }
            _ => {}
        }
    }

    fn dialogue(&mut self, intent: Intent) {
        let state = &mut self.state;
        if dialogue::current_node(state).is_none() {
            state.dialogue = None;
            state.mode = Mode::Playing;
            return;
        }
        match intent {
            Intent::MenuUp => dialogue::navigate(state, -1),
            Intent::MenuDown => dialogue::navigate(state, 1),
            Intent::Confirm => dialogue::confirm(state),
            Intent::Cancel => dialogue::cancel(state),
            _ => {}
        }
    }

    fn dead(&mut self, intent: Intent) {
        match intent {
            Intent::OpenInventory => self.open_inventory(),
            Intent::ToggleHelp => self.state.show_help = !self.state.show_help,
            Intent::ToggleLabels => self.state.show_labels = !self.state.show_labels,
            other => log::debug!("ignored while dead: {other:?}"),
        }
    }
}
