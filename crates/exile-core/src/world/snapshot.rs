//! Read-only renderer view of the world

use serde::Serialize;

use super::messages::Message;
use super::state::{DebugShape, MenuState, Mode, WorldState};
use crate::dungeon::{MapId, Position, Tile, Warp};
use crate::monster::Entity;
use crate::object::ItemId;
use crate::player::Player;
use crate::special::{ShopItem, current_node};

/// Dialogue text and option labels at the current node
#[derive(Debug, Clone, Serialize)]
pub struct DialogueView<'a> {
    pub text: &'a str,
    pub options: Vec<&'a str>,
}

/// Everything a renderer needs for one frame.
///
/// Tiles and warps are listed in position order so two snapshots of the same
/// state serialize identically.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub map: MapId,
    pub map_name: &'a str,
    pub width: i32,
    pub height: i32,
    pub turn: u64,
    pub tiles: Vec<(Position, &'a Tile)>,
    pub warps: Vec<(Position, &'a Warp)>,
    pub npcs: &'a [Entity],
    pub player: &'a Player,
    pub messages: Vec<&'a Message>,
    pub mode: Mode,
    pub menu: MenuState,
    pub show_help: bool,
    pub show_labels: bool,
    pub binds: &'a [Option<ItemId>],
    pub shop: &'a [ShopItem],
    pub dialogue: Option<DialogueView<'a>>,
    pub debug_shapes: &'a [DebugShape],
}

impl<'a> Snapshot<'a> {
    pub fn of(state: &'a WorldState) -> Self {
        let mut tiles: Vec<_> = state.tiles.iter().map(|(pos, tile)| (*pos, tile)).collect();
        tiles.sort_by_key(|(pos, _)| *pos);
        let mut warps: Vec<_> = state.warps.iter().map(|(pos, warp)| (*pos, warp)).collect();
        warps.sort_by_key(|(pos, _)| *pos);

        let shop = state
            .active_shop
            .map_or(&[][..], |id| state.shops.items(id));
        let dialogue = current_node(state).map(|node| DialogueView {
            text: &node.text,
            options: node.options.iter().map(|o| o.label.as_str()).collect(),
        });

        Self {
            map: state.current_map,
            map_name: &state.map_name,
            width: state.width,
            height: state.height,
            turn: state.turn,
            tiles,
            warps,
            npcs: &state.npcs,
            player: &state.player,
            messages: state.messages.iter().collect(),
            mode: state.mode,
            menu: state.menu,
            show_help: state.show_help,
            show_labels: state.show_labels,
            binds: &state.binds,
            shop,
            dialogue,
            debug_shapes: &state.debug_shapes,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::dungeon::{MapId, Position};
    use crate::test_support::world_on;

    #[test]
    fn test_snapshot_is_sorted_and_serializable() {
        let mut state = world_on(MapId::StartArea, Position::new(5, 5));
        state.message("hello");
        let snap = state.snapshot();
        assert!(snap.tiles.windows(2).all(|w| w[0].0 < w[1].0));
        assert_eq!(snap.npcs.len(), 2);
        assert!(snap.dialogue.is_none());

        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["map"], "start_area");
        assert_eq!(json["mode"], "playing");
        assert_eq!(json["messages"][0]["text"], "hello");
    }
}
