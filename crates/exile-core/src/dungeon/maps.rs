//! The authored world
//!
//! Nine bordered maps joined by direction-gated gates. Gates sit in the middle
//! of a border wall and drop the player one cell inside the matching gate of
//! the neighbouring map.

use super::template::{LoadEffect, MapId, MapRegistry, MapTemplate, TileRule, UnlockRule, Warp};
use super::{Position, Tile, TileTag};
use crate::action::Direction;
use crate::monster::{Alignment, Behavior, Entity};
use crate::object::ItemId;
use crate::{
    BEAR_DEAD_FLAG, CHEST_OPENED_FLAG, DEFAULT_ENTITY_HEALTH, GOLD_TAKEN_FLAG, PIG_DEAD_FLAG,
    TORCH_TAKEN_FLAG, WEST_GATE_FLAG,
};

const COLS: i32 = 24;
const ROWS: i32 = 16;
const MID_X: i32 = COLS / 2;
const MID_Y: i32 = ROWS / 2;

const fn pos(x: i32, y: i32) -> Position {
    Position::new(x, y)
}

const fn warp(target: MapId, x: i32, y: i32, exit: Direction) -> Warp {
    Warp::new(target, pos(x, y), Some(exit))
}

/// Standard bordered map
fn field(id: MapId, name: &str) -> MapTemplate {
    MapTemplate::new(id, name, COLS, ROWS).with_border()
}

fn hostile(entity: Entity) -> Entity {
    entity.with_alignment(Alignment::Hostile).attackable()
}

fn start_area() -> MapTemplate {
    field(MapId::StartArea, "Start")
        .with_gate(pos(COLS - 1, MID_Y), warp(MapId::WoodsEntrance, 1, MID_Y, Direction::Right))
        .with_gate(pos(MID_X, 0), warp(MapId::TownShop, MID_X, ROWS - 2, Direction::Up))
        .with_npc(Entity::new(MID_X, MID_Y, '?', "Sign", "Directions", Behavior::Signpost).with_sprite("sign"))
        .with_npc(Entity::new(MID_X - 2, MID_Y, 'S', "Sage", "Riddle giver", Behavior::Sage).with_sprite("sage"))
        .with_unlock(UnlockRule {
            flag: WEST_GATE_FLAG.to_string(),
            open: vec![pos(0, MID_Y)],
            warps: vec![(pos(0, MID_Y), warp(MapId::RiddleRoom, 14, 6, Direction::Left))],
            message: "You hear a mechanism unlocking to the west.".to_string(),
        })
}

fn woods_entrance() -> MapTemplate {
    field(MapId::WoodsEntrance, "Woods Entrance")
        .with_gate(pos(0, MID_Y), warp(MapId::StartArea, COLS - 2, MID_Y, Direction::Left))
        .with_gate(pos(COLS - 1, MID_Y), warp(MapId::ForestA, 1, MID_Y, Direction::Right))
        .with_npc(Entity::new(5, MID_Y, 'T', "Lazy Trapper", "Trades meat for gold", Behavior::Vendor).with_sprite("trapper"))
}

fn forest_a() -> MapTemplate {
    field(MapId::ForestA, "Forest A")
        .with_gate(pos(0, MID_Y), warp(MapId::WoodsEntrance, COLS - 2, MID_Y, Direction::Left))
        .with_gate(pos(COLS - 1, MID_Y), warp(MapId::ForestD, 1, MID_Y, Direction::Right))
        .with_gate(pos(MID_X, 0), warp(MapId::ForestB, MID_X, ROWS - 2, Direction::Up))
}

fn forest_b() -> MapTemplate {
    let pig = Entity::new(MID_X - 3, MID_Y, 'p', "Pig", "Charges if close", Behavior::Charge)
        .with_health(3)
        .with_sprite("pig");
    field(MapId::ForestB, "Forest B")
        .with_gate(pos(MID_X, ROWS - 1), warp(MapId::ForestA, MID_X, 1, Direction::Down))
        .with_gate(pos(COLS - 1, MID_Y), warp(MapId::ForestC, 1, MID_Y, Direction::Right))
        .with_enemy(hostile(pig))
        .with_on_load(LoadEffect::HideNamedIfFlag {
            names: vec!["Pig".to_string()],
            flag: PIG_DEAD_FLAG.to_string(),
        })
}

fn forest_c() -> MapTemplate {
    let bear = Entity::new(MID_X + 3, MID_Y, 'B', "Bear", "Do not wake", Behavior::Dormant)
        .with_health(DEFAULT_ENTITY_HEALTH)
        .with_sprite("bear");
    let chest = Entity::new(20, 3, 'C', "Treasure Chest", "Heavy and unlocked", Behavior::Container)
        .with_sprite("chest");
    let leaves = [(5, 5), (8, 7), (12, 4), (6, 9), (10, 6), (14, 8)];

    field(MapId::ForestC, "Forest C")
        .with_gate(pos(MID_X, ROWS - 1), warp(MapId::ForestD, MID_X, 1, Direction::Down))
        .with_gate(pos(0, MID_Y), warp(MapId::ForestB, COLS - 2, MID_Y, Direction::Left))
        .with_npc(chest)
        .with_enemy(hostile(bear))
        .with_on_load(LoadEffect::HideNamedIfFlag {
            names: vec!["Bear".to_string()],
            flag: BEAR_DEAD_FLAG.to_string(),
        })
        .with_on_load(LoadEffect::MarkOpenedIfFlag {
            names: vec!["Treasure Chest".to_string()],
            flag: CHEST_OPENED_FLAG.to_string(),
        })
        .with_on_load(LoadEffect::PlaceTiles {
            tile: Tile::leaves(),
            cells: leaves.iter().map(|&(x, y)| pos(x, y)).collect(),
            unless_flag: None,
        })
}

fn forest_d() -> MapTemplate {
    field(MapId::ForestD, "Forest D")
        .with_gate(pos(0, MID_Y), warp(MapId::ForestA, COLS - 2, MID_Y, Direction::Left))
        .with_gate(pos(MID_X, 0), warp(MapId::ForestC, MID_X, ROWS - 2, Direction::Up))
        .with_gate(pos(COLS - 1, MID_Y), warp(MapId::BunnyArea, 1, MID_Y, Direction::Right))
        .with_solid(pos(6, 4))
        .with_solid(pos(17, 11))
        .with_solid(pos(18, 11))
}

fn bunny_area() -> MapTemplate {
    field(MapId::BunnyArea, "Bunny Glade")
        .with_gate(pos(0, MID_Y), warp(MapId::ForestD, COLS - 2, MID_Y, Direction::Left))
        .with_npc(Entity::new(MID_X + 6, MID_Y, 'o', "Bunny Hole", "Spawns bunnies", Behavior::Hut).with_sprite("bunny_hole"))
}

fn town_shop() -> MapTemplate {
    field(MapId::TownShop, "Town Shop")
        .with_gate(pos(MID_X, ROWS - 1), warp(MapId::StartArea, MID_X, 1, Direction::Down))
        .with_npc(Entity::new(MID_X, MID_Y, 'I', "Item Shop", "Sells powerful gear", Behavior::Shopkeeper).with_sprite("shop"))
}

fn riddle_room() -> MapTemplate {
    let (cols, rows) = (16, 12);
    MapTemplate::new(MapId::RiddleRoom, "Hidden Vault", cols, rows)
        .with_border()
        .with_gate(pos(cols - 1, rows / 2), warp(MapId::StartArea, 1, MID_Y, Direction::Right))
        .with_npc(Entity::new(cols / 2, rows / 2, '$', "Gold", "Shiny coin pile", Behavior::GoldPickup).with_sprite("gold"))
        .with_on_load(LoadEffect::HideBehaviorIfFlag {
            behavior: Behavior::GoldPickup,
            flag: GOLD_TAKEN_FLAG.to_string(),
        })
        .with_on_load(LoadEffect::PlaceTiles {
            tile: Tile::torch(),
            cells: vec![pos(3, 2)],
            unless_flag: Some(TORCH_TAKEN_FLAG.to_string()),
        })
        .with_on_load(LoadEffect::PlaceTiles {
            tile: Tile::torch(),
            cells: vec![pos(cols - 4, 2)],
            unless_flag: None,
        })
        .with_tile_rule(TileRule {
            pos: pos(3, 2),
            tag: TileTag::Torch,
            grant: ItemId::Torch,
            flag: TORCH_TAKEN_FLAG.to_string(),
            message: "You take the torch. It lights your way.".to_string(),
        })
}

impl MapRegistry {
    /// Every authored map
    pub fn authored() -> Self {
        let mut registry = Self::new();
        for template in [
            start_area(),
            woods_entrance(),
            forest_a(),
            forest_b(),
            forest_c(),
            forest_d(),
            bunny_area(),
            town_shop(),
            riddle_room(),
        ] {
            registry.register(template);
        }
        registry
    }
}
