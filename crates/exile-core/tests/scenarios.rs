//! End-to-end scenarios driven through the game loop.

#![allow(clippy::unwrap_used)]

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::world_on;
use exile_core::action::{Direction, Intent};
use exile_core::dungeon::{MapId, MapRegistry, MapTemplate, Position, Warp, load_map};
use exile_core::monster::{Alignment, Behavior, Entity};
use exile_core::object::ItemId;
use exile_core::world::{AudioError, AudioSink, EngineOptions, Mode, SoundCue, WorldState};
use exile_core::{GameLoop, LoopResult, PIG_DEAD_FLAG, RIDDLE_SOLVED_FLAG, WEST_GATE_FLAG};

fn walk(game: &mut GameLoop, dir: Direction, steps: usize) {
    for _ in 0..steps {
        game.handle(Intent::Move(dir));
    }
}

/// Records every cue it is asked to play; fails on the bow cue.
struct Recorder(Rc<RefCell<Vec<SoundCue>>>);

impl AudioSink for Recorder {
    fn play(&mut self, cue: SoundCue) -> Result<(), AudioError> {
        if cue == SoundCue::Bow {
            return Err(AudioError::Missing(cue));
        }
        self.0.borrow_mut().push(cue);
        Ok(())
    }
}

#[test]
fn test_one_health_player_dies_and_stays_dead() {
    let mut state = world_on(MapId::ForestB, Position::new(12, 8), 5);
    state.player.health = 1;
    let mut game = GameLoop::new(state);

    game.handle(Intent::Move(Direction::Left));
    let state = game.state();
    assert_eq!(state.mode, Mode::Dead);
    assert!(state.messages.contains("Pig bite hits you for 1!"));
    assert!(state.messages.contains("You have died..."));

    let (turn, pos) = (state.turn, state.player.pos);
    walk(&mut game, Direction::Right, 3);
    game.handle(Intent::Attack);
    assert_eq!(game.state().turn, turn);
    assert_eq!(game.state().player.pos, pos);
    assert_eq!(game.state().mode, Mode::Dead);
}

#[test]
fn test_killing_the_pig_is_permanent() {
    let mut state = world_on(MapId::ForestB, Position::new(10, 8), 5);
    state.player.inventory.add(ItemId::Sword, 1);
    state.binds[1] = Some(ItemId::Sword);
    let mut game = GameLoop::new(state);

    game.handle(Intent::UseSlot(1));
    let state = game.state();
    assert!(state.npcs.iter().all(|n| n.name != "Pig"));
    assert!(state.messages.contains("You used Sword Slash on Pig for 3 damage!"));
    assert!(state.messages.contains("You killed the Pig!"));
    assert_eq!(state.player.inventory.count(ItemId::PigCarcass), 1);
    assert!(state.flags.has(PIG_DEAD_FLAG));

    let state = game.state_mut();
    load_map(state, MapId::ForestB, Some(Position::new(3, 3))).unwrap();
    assert!(state.npcs.is_empty());
}

#[test]
fn test_warp_requires_matching_direction() {
    let mut registry = MapRegistry::new();
    registry.register(
        MapTemplate::new(MapId::ForestA, "Test Field", 10, 10)
            .with_border()
            .with_gate(
                Position::new(5, 5),
                Warp::new(MapId::ForestD, Position::new(2, 2), Some(Direction::Left)),
            ),
    );
    registry.register(MapTemplate::new(MapId::ForestD, "Target", 6, 6).with_border());
    let options = EngineOptions {
        seed: Some(1),
        start_map: MapId::ForestA,
        start_position: Some(Position::new(4, 5)),
        ..EngineOptions::default()
    };
    let mut state = WorldState::with_registry(registry, options).unwrap();
    state.mode = Mode::Playing;
    let mut game = GameLoop::new(state);

    game.handle(Intent::Move(Direction::Right));
    assert_eq!(game.state().current_map, MapId::ForestA);
    assert_eq!(game.state().player.pos, Position::new(5, 5));

    game.handle(Intent::Move(Direction::Right));
    game.handle(Intent::Move(Direction::Left));
    assert_eq!(game.state().current_map, MapId::ForestD);
    assert_eq!(game.state().player.pos, Position::new(2, 2));
    assert_eq!(game.state().width, 6);
}

#[test]
fn test_riddle_opens_the_west_gate() {
    let state = WorldState::new(EngineOptions::default().with_seed(11)).unwrap();
    let mut game = GameLoop::new(state);
    assert_eq!(game.handle(Intent::Confirm), LoopResult::Continue);
    assert_eq!(game.state().mode, Mode::Playing);

    walk(&mut game, Direction::Left, 3);
    walk(&mut game, Direction::Up, 2);
    assert_eq!(game.state().player.pos, Position::new(9, 8));

    game.handle(Intent::Interact(Some(Direction::Right)));
    assert_eq!(game.state().mode, Mode::Dialogue);
    game.handle(Intent::Confirm);
    game.handle(Intent::Confirm);

    let state = game.state();
    assert_eq!(state.mode, Mode::Playing);
    assert!(state.flags.has(RIDDLE_SOLVED_FLAG));
    assert!(state.flags.has(WEST_GATE_FLAG));
    assert!(state.messages.contains("You hear a mechanism unlocking to the west."));

    walk(&mut game, Direction::Left, 9);
    assert_eq!(game.state().current_map, MapId::RiddleRoom);
    assert_eq!(game.state().player.pos, Position::new(14, 6));

    walk(&mut game, Direction::Left, 5);
    game.handle(Intent::Interact(None));
    assert_eq!(game.state().player.gold, 100);
}

#[test]
fn test_buying_past_the_limit_is_sold_out() {
    let mut state = world_on(MapId::TownShop, Position::new(12, 9), 2);
    state.player.gold = 50;
    let mut game = GameLoop::new(state);

    game.handle(Intent::Trade);
    assert_eq!(game.state().mode, Mode::Shop);
    game.handle(Intent::Confirm);
    assert_eq!(game.state().player.gold, 45);

    game.handle(Intent::Confirm);
    let state = game.state();
    assert_eq!(state.player.gold, 45);
    assert_eq!(state.player.inventory.count(ItemId::Sword), 1);
    assert!(state.messages.contains("Sword is sold out."));
}

#[test]
fn test_trapper_buys_the_haul() {
    let mut state = world_on(MapId::WoodsEntrance, Position::new(4, 8), 2);
    state.player.inventory.add(ItemId::RabbitCorpse, 2);
    state.player.inventory.add(ItemId::PigCarcass, 1);
    let mut game = GameLoop::new(state);

    game.handle(Intent::Interact(Some(Direction::Right)));
    let state = game.state();
    assert_eq!(state.player.gold, 2 + 4);
    assert!(state.player.inventory.is_empty());
    assert!(state.messages.contains("Traded 1 pig carcasses for 4 gold."));
}

#[test]
fn test_cues_reach_the_sink() {
    let heard = Rc::new(RefCell::new(Vec::new()));
    let mut state = world_on(MapId::ForestA, Position::new(5, 5), 2);
    state.player.inventory.add(ItemId::Bow, 1);
    state.binds[2] = Some(ItemId::Bow);
    state.spawn(
        Entity::new(6, 5, 'd', "Dummy", "Takes hits", Behavior::None)
            .with_health(10)
            .with_alignment(Alignment::Hostile)
            .attackable(),
    );
    let mut game = GameLoop::new(state).with_sink(Box::new(Recorder(Rc::clone(&heard))));

    game.handle(Intent::Attack);
    game.handle(Intent::UseSlot(2));
    game.state_mut().npcs.clear();
    game.handle(Intent::Attack);
    // The bow cue fails to play and is skipped
    assert_eq!(*heard.borrow(), vec![SoundCue::Punch, SoundCue::Miss]);
    assert!(game.state().cues.is_empty());
    assert_eq!(game.state().messages.len(), 3);
}

#[test]
fn test_waking_the_bear() {
    let state = world_on(MapId::ForestC, Position::new(4, 5), 9);
    let mut game = GameLoop::new(state);
    game.handle(Intent::Move(Direction::Right));
    let state = game.state();
    assert!(state.messages.contains("You step on crunchy leaves. A bear wakes up!"));
    let bear = state.npcs.iter().find(|n| n.name == "Bear").unwrap();
    assert_eq!(bear.pos, Position::new(14, 8));
}
