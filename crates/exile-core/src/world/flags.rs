//! Scoped world flags
//!
//! Two independent stores of named facts with an optional countdown. Global
//! flags survive map loads; map flags are wiped whenever a map loads.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::errors::FlagError;

/// Which store a flag lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FlagScope {
    Global,
    Map,
}

impl FlagScope {
    /// Parse a scope name, rejecting anything but `global` / `map`
    pub fn parse(name: &str) -> Result<Self, FlagError> {
        name.parse()
            .map_err(|_| FlagError::UnknownScope(name.to_string()))
    }
}

/// Remaining turns for a flag; `None` is permanent until unset
pub type FlagDuration = Option<u32>;

/// Global and per-map flag stores
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlagStore {
    global: HashMap<String, FlagDuration>,
    map: HashMap<String, FlagDuration>,
}

impl FlagStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn store_mut(&mut self, scope: FlagScope) -> &mut HashMap<String, FlagDuration> {
        match scope {
            FlagScope::Global => &mut self.global,
            FlagScope::Map => &mut self.map,
        }
    }

    /// Set (or overwrite) a flag.
    ///
    /// A duration of `Some(0)` has already run out, so the flag is removed
    /// from that scope rather than stored.
    pub fn set(&mut self, name: impl Into<String>, scope: FlagScope, duration: FlagDuration) {
        let name = name.into();
        let store = self.store_mut(scope);
        if duration == Some(0) {
            store.remove(&name);
        } else {
            store.insert(name, duration);
        }
    }

    /// Set a flag with a scope given by name
    pub fn set_named_scope(
        &mut self,
        name: impl Into<String>,
        scope: &str,
        duration: FlagDuration,
    ) -> Result<(), FlagError> {
        let scope = FlagScope::parse(scope)?;
        self.set(name, scope, duration);
        Ok(())
    }

    /// Remove a flag from one scope, or from both when `scope` is `None`
    pub fn unset(&mut self, name: &str, scope: Option<FlagScope>) {
        if matches!(scope, None | Some(FlagScope::Global)) {
            self.global.remove(name);
        }
        if matches!(scope, None | Some(FlagScope::Map)) {
            self.map.remove(name);
        }
    }

    /// True if the flag is present in either store
    pub fn has(&self, name: &str) -> bool {
        self.map.contains_key(name) || self.global.contains_key(name)
    }

    /// Remaining duration of a flag in a given scope
    pub fn remaining(&self, name: &str, scope: FlagScope) -> Option<FlagDuration> {
        match scope {
            FlagScope::Global => self.global.get(name).copied(),
            FlagScope::Map => self.map.get(name).copied(),
        }
    }

    /// Count every timed flag down by one turn, dropping any that reach zero
    pub fn tick(&mut self) {
        for store in [&mut self.global, &mut self.map] {
            store.retain(|_, remaining| match remaining {
                None => true,
                Some(turns) => {
                    *turns = turns.saturating_sub(1);
                    *turns > 0
                }
            });
        }
    }

    /// Drop every map-scoped flag (called on map load)
    pub fn clear_map(&mut self) {
        self.map.clear();
    }

    /// Number of flags in a scope
    pub fn len(&self, scope: FlagScope) -> usize {
        match scope {
            FlagScope::Global => self.global.len(),
            FlagScope::Map => self.map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.map.is_empty()
    }
}
