//! Items and typed inventories
//!
//! Every item is either a plain stack or a stateful single item (a torch that
//! burns down). Inventories are ordered so menus list items stably.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Item identifiers
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ItemId {
    Bow,
    Sword,
    Torch,
    RabbitCorpse,
    PigCarcass,
    BearPelt,
}

impl ItemId {
    /// Display name
    pub const fn name(&self) -> &'static str {
        match self {
            ItemId::Bow => "Bow",
            ItemId::Sword => "Sword",
            ItemId::Torch => "Torch",
            ItemId::RabbitCorpse => "Rabbit Corpse",
            ItemId::PigCarcass => "Pig Carcass",
            ItemId::BearPelt => "Bear Pelt",
        }
    }

    /// Lower-case plural, for trade messages
    pub const fn plural(&self) -> &'static str {
        match self {
            ItemId::Bow => "bows",
            ItemId::Sword => "swords",
            ItemId::Torch => "torches",
            ItemId::RabbitCorpse => "rabbit corpses",
            ItemId::PigCarcass => "pig carcasses",
            ItemId::BearPelt => "bear pelts",
        }
    }

    /// Gold per unit the trapper pays, for meat-like resources
    pub const fn trade_rate(&self) -> Option<i32> {
        match self {
            ItemId::RabbitCorpse => Some(1),
            ItemId::PigCarcass => Some(4),
            ItemId::BearPelt => Some(10),
            ItemId::Bow | ItemId::Sword | ItemId::Torch => None,
        }
    }
}

/// Per-item state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemState {
    Stackable(u32),
    Stateful { remaining: u32, active: bool },
}

impl ItemState {
    /// Units represented by this entry
    pub const fn count(&self) -> u32 {
        match self {
            ItemState::Stackable(n) => *n,
            ItemState::Stateful { .. } => 1,
        }
    }
}

/// Ordered item map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: BTreeMap<ItemId, ItemState>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: ItemId) -> Option<&ItemState> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut ItemState> {
        self.items.get_mut(&id)
    }

    pub fn has(&self, id: ItemId) -> bool {
        self.count(id) > 0
    }

    pub fn count(&self, id: ItemId) -> u32 {
        self.items.get(&id).map_or(0, ItemState::count)
    }

    /// Add `n` to a stack. A stateful entry under the same id is left as is.
    pub fn add(&mut self, id: ItemId, n: u32) {
        if n == 0 {
            return;
        }
        match self.items.get_mut(&id) {
            Some(ItemState::Stackable(count)) => *count = count.saturating_add(n),
            Some(ItemState::Stateful { .. }) => {}
            None => {
                self.items.insert(id, ItemState::Stackable(n));
            }
        }
    }

    /// Replace an entry outright
    pub fn set(&mut self, id: ItemId, state: ItemState) {
        self.items.insert(id, state);
    }

    pub fn remove(&mut self, id: ItemId) -> Option<ItemState> {
        self.items.remove(&id)
    }

    /// Owned item ids in menu order (by display name)
    pub fn ids(&self) -> Vec<ItemId> {
        let mut ids: Vec<_> = self.items.keys().copied().collect();
        ids.sort_by_key(|id| id.name());
        ids
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &ItemState)> {
        self.items.iter().map(|(id, state)| (*id, state))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ItemId, &mut ItemState)> {
        self.items.iter_mut().map(|(id, state)| (*id, state))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
