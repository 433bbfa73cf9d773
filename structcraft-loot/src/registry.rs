//! The external custom-item registry seam.

use std::collections::HashMap;

use crate::item::ItemStack;

/// Resolves custom item keys to concrete items.
///
/// Implemented by the host's custom-item subsystem; loot loading only ever
/// asks for one key at a time.
pub trait ItemRegistry {
    /// Returns the item registered under `key`, if any.
    fn resolve(&self, key: &str) -> Option<ItemStack>;
}

/// A registry with no custom items, for hosts without that subsystem.
pub struct NoCustomItems;

impl ItemRegistry for NoCustomItems {
    fn resolve(&self, _key: &str) -> Option<ItemStack> {
        None
    }
}

impl ItemRegistry for HashMap<String, ItemStack> {
    fn resolve(&self, key: &str) -> Option<ItemStack> {
        self.get(key).cloned()
    }
}
