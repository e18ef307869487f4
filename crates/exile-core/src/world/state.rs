//! World state aggregate
//!
//! One value owns everything a run can change. Every resolver receives it by
//! mutable reference, one call chain at a time.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::errors::MapError;
use super::flags::FlagStore;
use super::messages::MessageLog;
use super::options::EngineOptions;
use super::snapshot::Snapshot;
use super::sound::SoundCue;
use crate::action::{Direction, MoveRepeat};
use crate::dungeon::{EconomyLedger, MapId, MapRegistry, MapTemplate, Position, Tile, Warp, load_map};
use crate::monster::{Entity, EntityId};
use crate::object::ItemId;
use crate::player::Player;
use crate::special::{DialogueBook, DialogueSession, ShopId, ShopRegistry, initial_dialogues};
use crate::{GameRng, SLOT_COUNT};

/// Top-level mode; each owns its own input handling
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    MainMenu,
    Settings,
    Playing,
    Shop,
    Inventory,
    Dialogue,
    Dead,
}

/// Selection index of every menu
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuState {
    pub main: usize,
    pub shop: usize,
    pub inventory: usize,
    pub dialogue: usize,
}

/// Debug overlay marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugShape {
    pub pos: Position,
    pub label: String,
}

/// The whole mutable world
#[derive(Debug, Clone)]
pub struct WorldState {
    /// Read-only map templates
    pub registry: MapRegistry,
    pub current_map: MapId,
    pub map_name: String,
    pub width: i32,
    pub height: i32,
    /// Runtime tiles; absent cells are open floor
    pub tiles: HashMap<Position, Tile>,
    pub warps: HashMap<Position, Warp>,
    /// Runtime entities in AI/combat iteration order
    pub npcs: Vec<Entity>,
    pub player: Player,
    pub turn: u64,
    pub flags: FlagStore,

    pub dialogues: DialogueBook,
    pub dialogue: Option<DialogueSession>,
    pub shops: ShopRegistry,
    pub active_shop: Option<ShopId>,
    /// Item bound to each number key
    pub binds: [Option<ItemId>; SLOT_COUNT],

    pub mode: Mode,
    pub menu: MenuState,
    pub show_help: bool,
    pub show_labels: bool,
    pub messages: MessageLog,
    /// Cues requested since the last flush
    pub cues: Vec<SoundCue>,
    pub debug_shapes: Vec<DebugShape>,

    pub economy: EconomyLedger,
    pub repeat: MoveRepeat,
    /// Last direction the player pressed; interaction falls back to it
    pub last_dir: Option<Direction>,
    pub rng: GameRng,
    pub options: EngineOptions,

    next_id: EntityId,
}

impl WorldState {
    /// New run over the authored world, sitting on the main menu
    pub fn new(options: EngineOptions) -> Result<Self, MapError> {
        Self::with_registry(MapRegistry::authored(), options)
    }

    /// New run over an arbitrary set of templates
    pub fn with_registry(registry: MapRegistry, options: EngineOptions) -> Result<Self, MapError> {
        let start = registry
            .get(options.start_map)
            .map(MapTemplate::center)
            .ok_or(MapError::UnknownMap(options.start_map))?;
        let rng = options.seed.map_or_else(GameRng::from_entropy, GameRng::new);

        let mut state = Self {
            registry,
            current_map: options.start_map,
            map_name: String::new(),
            width: 0,
            height: 0,
            tiles: HashMap::new(),
            warps: HashMap::new(),
            npcs: Vec::new(),
            player: Player::new(options.player_health),
            turn: 0,
            flags: FlagStore::new(),
            dialogues: initial_dialogues(),
            dialogue: None,
            shops: ShopRegistry::initial(),
            active_shop: None,
            binds: [None; SLOT_COUNT],
            mode: Mode::MainMenu,
            menu: MenuState::default(),
            show_help: false,
            show_labels: false,
            messages: MessageLog::new(options.message_capacity),
            cues: Vec::new(),
            debug_shapes: Vec::new(),
            economy: EconomyLedger::new(),
            repeat: MoveRepeat::new(options.move_repeat_interval_ms),
            last_dir: None,
            rng,
            options,
            next_id: EntityId::PLAYER.next(),
        };

        let (map, spawn) = (state.options.start_map, state.options.start_position);
        if spawn.is_none() {
            state.player.pos = start;
        }
        load_map(&mut state, map, spawn)?;
        log::debug!("new run, seed {}", state.rng.seed());
        Ok(state)
    }

    /// Log a player-visible line stamped with the current turn
    pub fn message(&mut self, text: impl Into<String>) {
        self.messages.push(text, self.turn);
    }

    /// Queue a sound cue for the audio collaborator
    pub fn request_cue(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }

    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }

    /// Add a runtime entity with a fresh id, at the end of the list
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = self.next_entity_id();
        self.npcs.push(entity.instantiate(id));
        id
    }

    pub const fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    /// Who stands on `pos`, the player included
    pub fn occupant(&self, pos: Position, ignoring: Option<EntityId>) -> Option<EntityId> {
        if self.player.pos == pos && ignoring != Some(EntityId::PLAYER) {
            return Some(EntityId::PLAYER);
        }
        self.npcs
            .iter()
            .find(|npc| npc.pos == pos && ignoring != Some(npc.id))
            .map(|npc| npc.id)
    }

    pub fn entity_pos(&self, id: EntityId) -> Option<Position> {
        if id == EntityId::PLAYER {
            return Some(self.player.pos);
        }
        self.npc(id).map(|npc| npc.pos)
    }

    pub fn npc_index(&self, id: EntityId) -> Option<usize> {
        self.npcs.iter().position(|npc| npc.id == id)
    }

    pub fn npc(&self, id: EntityId) -> Option<&Entity> {
        self.npcs.iter().find(|npc| npc.id == id)
    }

    pub fn current_template(&self) -> Option<&MapTemplate> {
        self.registry.get(self.current_map)
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::of(self)
    }
}
