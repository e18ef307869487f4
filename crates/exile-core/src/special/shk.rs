//! Shops and trading
//!
//! Two kinds of commerce: the trapper buys every meat-like resource the
//! player carries at fixed rates, and shopkeepers open a shop session over a
//! registered inventory.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::monster::{Behavior, EntityId};
use crate::object::ItemId;
use crate::world::{Mode, SoundCue, WorldState};

/// Registered shop inventories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ShopId {
    ItemShop,
}

/// One line of a shop inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopItem {
    pub item: ItemId,
    pub cost: i32,
    pub description: String,
    /// Purchase limit for this run; `None` is unlimited
    pub max_qty: Option<u32>,
    pub purchased: u32,
}

impl ShopItem {
    pub fn new(item: ItemId, cost: i32, description: impl Into<String>, max_qty: Option<u32>) -> Self {
        Self {
            item,
            cost,
            description: description.into(),
            max_qty,
            purchased: 0,
        }
    }

    pub fn name(&self) -> &'static str {
        self.item.name()
    }

    pub fn is_sold_out(&self) -> bool {
        self.max_qty.is_some_and(|max| self.purchased >= max)
    }
}

/// Shop inventories by id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopRegistry {
    shops: HashMap<ShopId, Vec<ShopItem>>,
}

impl ShopRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock every run starts with
    pub fn initial() -> Self {
        let mut registry = Self::new();
        registry.register(
            ShopId::ItemShop,
            vec![
                ShopItem::new(ItemId::Sword, 5, "A sturdy blade. Slash for 3 damage.", Some(1)),
                ShopItem::new(ItemId::Bow, 8, "Hits targets two cells away for 2 damage.", Some(1)),
            ],
        );
        registry
    }

    /// Register or replace a shop's stock
    pub fn register(&mut self, id: ShopId, items: Vec<ShopItem>) {
        self.shops.insert(id, items);
    }

    pub fn items(&self, id: ShopId) -> &[ShopItem] {
        self.shops.get(&id).map_or(&[], Vec::as_slice)
    }

    pub fn items_mut(&mut self, id: ShopId) -> Option<&mut Vec<ShopItem>> {
        self.shops.get_mut(&id)
    }

    pub fn contains(&self, id: ShopId) -> bool {
        self.shops.contains_key(&id)
    }
}

/// Enter a shop session
pub fn open_shop(state: &mut WorldState, shop: ShopId) {
    if !state.shops.contains(shop) {
        log::warn!("no stock registered for shop '{shop}'");
        return;
    }
    state.active_shop = Some(shop);
    state.menu.shop = 0;
    state.mode = Mode::Shop;
}

/// Buy the selected item of the active shop.
///
/// Returns true if something was bought.
pub fn purchase(state: &mut WorldState) -> bool {
    let Some(shop) = state.active_shop else {
        return false;
    };
    let index = state.menu.shop;
    let gold = state.player.gold;
    let Some(line) = state
        .shops
        .items_mut(shop)
        .and_then(|items| items.get_mut(index))
    else {
        return false;
    };

    let name = line.name();
    if line.is_sold_out() {
        state.message(format!("{name} is sold out."));
        state.request_cue(SoundCue::Grunt);
        return false;
    }
    if gold < line.cost {
        let cost = line.cost;
        state.message(format!("Not enough gold for {name} ({cost}g)."));
        state.request_cue(SoundCue::Grunt);
        return false;
    }

    line.purchased += 1;
    let (item, cost) = (line.item, line.cost);
    state.player.gold -= cost;
    state.player.inventory.add(item, 1);
    state.message(format!("You bought a {name}!"));
    state.request_cue(SoundCue::Purchase);
    true
}

/// Sell every tradeable resource to a trapper
pub fn trade_with_trapper(state: &mut WorldState, trader: EntityId) {
    let goods: Vec<(ItemId, u32, i32)> = state
        .player
        .inventory
        .iter()
        .filter_map(|(id, item)| id.trade_rate().map(|rate| (id, item.count(), rate)))
        .filter(|(_, count, _)| *count > 0)
        .collect();

    if goods.is_empty() {
        let name = state
            .npc(trader)
            .map_or_else(|| "Trapper".to_string(), |npc| npc.name.clone());
        state.message(format!(
            "{name}: Can't catch any rabbits today... got any rabbit corpses?"
        ));
        return;
    }

    for (id, count, rate) in goods {
        let earned = rate * count as i32;
        state.player.inventory.remove(id);
        state.player.gold += earned;
        state.message(format!("Traded {count} {} for {earned} gold.", id.plural()));
    }
}

/// Direct trade command: the adjacent trapper first, then an adjacent shop
pub fn handle_commerce(state: &mut WorldState) {
    let origin = state.player.pos;
    let adjacent = |behavior: Behavior| {
        state
            .npcs
            .iter()
            .find(|npc| npc.behavior == behavior && npc.pos.chebyshev(origin) <= 1)
            .map(|npc| npc.id)
    };
    let trader = adjacent(Behavior::Vendor);
    let shopkeeper = adjacent(Behavior::Shopkeeper);

    if let Some(trader) = trader {
        trade_with_trapper(state, trader);
    } else if shopkeeper.is_some() {
        open_shop(state, ShopId::ItemShop);
    } else {
        state.message("Not near any vendor.");
    }
}
