//! Property-based tests for movement, the turn pipeline, flags and the economy.

#![allow(clippy::unwrap_used)]

mod common;

use hashbrown::HashSet;
use proptest::prelude::*;
use proptest::sample::select;
use strum::IntoEnumIterator;

use common::{occupied, world_on};
use exile_core::action::{Direction, Intent, can_move};
use exile_core::dungeon::{MapId, Position, SpawnKind, load_map, tick_economy};
use exile_core::monster::EntityId;
use exile_core::world::{FlagScope, FlagStore};
use exile_core::GameLoop;

fn any_map() -> impl Strategy<Value = MapId> {
    select(MapId::iter().collect::<Vec<_>>())
}

fn any_dir() -> impl Strategy<Value = Direction> {
    select(Direction::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Nothing can stand outside the current map.
    #[test]
    fn prop_out_of_bounds_never_movable(
        map in any_map(),
        x in -40i32..60,
        y in -40i32..60,
    ) {
        let state = world_on(map, Position::new(1, 1), 1);
        prop_assume!(!state.in_bounds(Position::new(x, y)));
        prop_assert!(!can_move(&state, x, y, None));
    }

    /// A flag with duration N is present for N-1 ticks and gone after N.
    #[test]
    fn prop_flag_expires_after_exactly_n_ticks(n in 1u32..200, global in any::<bool>()) {
        let scope = if global { FlagScope::Global } else { FlagScope::Map };
        let mut flags = FlagStore::new();
        flags.set("timed", scope, Some(n));
        flags.set("forever", scope, None);
        for _ in 1..n {
            flags.tick();
        }
        prop_assert!(flags.has("timed"));
        flags.tick();
        prop_assert!(!flags.has("timed"));
        prop_assert!(flags.has("forever"));
    }

    /// Loading any map empties the map store and leaves the global store alone.
    #[test]
    fn prop_load_clears_only_map_flags(
        map in any_map(),
        names in prop::collection::vec("[a-z]{1,8}", 1..8),
    ) {
        let mut state = world_on(MapId::ForestA, Position::new(2, 2), 3);
        for name in &names {
            state.flags.set(format!("map.{name}"), FlagScope::Map, None);
            state.flags.set(format!("global.{name}"), FlagScope::Global, Some(9));
        }
        let globals = state.flags.len(FlagScope::Global);
        load_map(&mut state, map, Some(Position::new(1, 1))).unwrap();
        prop_assert_eq!(state.flags.len(FlagScope::Map), 0);
        prop_assert_eq!(state.flags.len(FlagScope::Global), globals);
        for name in &names {
            let key = format!("global.{name}");
            prop_assert!(state.flags.has(&key));
        }
    }

    /// A load without a spawn cell never leaves the player in a wall or on
    /// top of another occupant, wherever they stood before.
    #[test]
    fn prop_spawnless_load_lands_on_free_cell(
        from in any_map(),
        to in any_map(),
        x in -5i32..30,
        y in -5i32..20,
    ) {
        let mut state = world_on(from, Position::new(1, 1), 5);
        state.player.pos = Position::new(x, y);
        load_map(&mut state, to, None).unwrap();
        let cells = occupied(&state);
        let unique: HashSet<_> = cells.iter().copied().collect();
        prop_assert_eq!(unique.len(), cells.len());
        prop_assert!(can_move(&state, state.player.pos.x, state.player.pos.y, Some(EntityId::PLAYER)));
    }

    /// The spawner never exceeds its lifetime cap.
    #[test]
    fn prop_economy_respects_cap(cap in 0u32..6, ticks in 0usize..150, seed in any::<u64>()) {
        let mut state = world_on(MapId::BunnyArea, Position::new(3, 3), seed);
        state.options.economy.spawn_percent = 100;
        state.options.economy.population_cap = cap;
        for _ in 0..ticks {
            tick_economy(&mut state);
        }
        let bunnies = state.npcs.iter().filter(|n| n.name == "Bunny").count();
        prop_assert!(state.economy.spawned(SpawnKind::Bunny) <= cap);
        prop_assert!(bunnies <= cap as usize);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Random walks through the world: no one ends up inside a collidable
    /// tile, no two occupants share a cell, and the turn counter advances by
    /// exactly one per accepted move.
    #[test]
    fn prop_random_walk_invariants(
        seed in any::<u64>(),
        start in select(vec![MapId::StartArea, MapId::BunnyArea, MapId::ForestB, MapId::ForestC]),
        moves in prop::collection::vec(any_dir(), 1..120),
    ) {
        let mut state = world_on(start, Position::new(4, 4), seed);
        state.options.economy.spawn_percent = 50;
        let mut game = GameLoop::new(state);

        for dir in moves {
            let before = game.state();
            let (turn, pos, map) = (before.turn, before.player.pos, before.current_map);

            game.handle(Intent::Move(dir));
            let after = game.state();

            let accepted = after.player.pos != pos || after.current_map != map;
            prop_assert_eq!(after.turn - turn, u64::from(accepted));

            for cell in occupied(after) {
                prop_assert!(after.in_bounds(cell));
                prop_assert!(!after.tiles.get(&cell).is_some_and(|t| t.collidable));
            }
            let cells = occupied(after);
            let unique: HashSet<_> = cells.iter().copied().collect();
            prop_assert_eq!(unique.len(), cells.len());
        }
    }
}
