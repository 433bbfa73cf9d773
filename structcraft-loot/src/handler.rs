//! A read-mostly cache of loot tables keyed by name.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::LootTableError;
use crate::registry::ItemRegistry;
use crate::table::LootTable;

/// Owns the loot table directory and constructs each table once per name.
///
/// Tables hold no external resources, so a reload simply drops the cache
/// and lets subsequent lookups re-read their definitions.
pub struct LootTableHandler {
    dir: PathBuf,
    registry: Box<dyn ItemRegistry>,
    tables: HashMap<String, LootTable>,
}

impl LootTableHandler {
    /// Creates a handler over a loot table directory.
    pub fn new(dir: impl Into<PathBuf>, registry: Box<dyn ItemRegistry>) -> Self {
        Self {
            dir: dir.into(),
            registry,
            tables: HashMap::new(),
        }
    }

    /// Returns the cached table or loads it from disk.
    pub fn get_or_load(&mut self, name: &str) -> Result<&LootTable, LootTableError> {
        let Self {
            dir,
            registry,
            tables,
        } = self;
        match tables.entry(name.to_owned()) {
            std::collections::hash_map::Entry::Occupied(entry) => Ok(entry.into_mut()),
            std::collections::hash_map::Entry::Vacant(entry) => {
                let table = LootTable::load(dir, name, registry.as_ref())?;
                Ok(entry.insert(table))
            }
        }
    }

    /// Returns an already-loaded table without touching the disk.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&LootTable> {
        self.tables.get(name)
    }

    /// The names of the currently loaded tables.
    #[must_use]
    pub fn loaded_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    /// Drops every cached table; they reload lazily on next use.
    pub fn reload(&mut self) {
        self.tables.clear();
    }
}
