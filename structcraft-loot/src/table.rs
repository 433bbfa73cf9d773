//! Loot table loading, validation, and drawing.

use std::path::Path;

use rand::Rng;
use structcraft_config::Document;
use tracing::warn;

use crate::error::LootTableError;
use crate::item::{ItemStack, LootItem};
use crate::registry::ItemRegistry;
use crate::sampler::WeightedSampler;

/// A named, weighted collection of loot entries with a roll count.
///
/// Validation happens entirely at load time; a constructed table only
/// answers draws. Each spawn event draws [`LootTable::rolls`] times,
/// independently and with replacement.
#[derive(Debug, Clone)]
pub struct LootTable {
    name: String,
    rolls: u32,
    items: Vec<LootItem>,
    sampler: WeightedSampler<ItemStack>,
}

impl LootTable {
    /// Loads the loot table named `name` from `<dir>/<name>.yml`.
    pub fn load(dir: &Path, name: &str, registry: &dyn ItemRegistry) -> Result<Self, LootTableError> {
        let path = dir.join(format!("{name}.yml"));
        if !path.is_file() {
            return Err(LootTableError::NotFound(name.to_owned()));
        }
        let doc = Document::load(&path)?;
        Self::from_document(name, &doc, registry)
    }

    /// Builds a loot table from an already-parsed definition document.
    ///
    /// Fails on a missing `Rolls` or `Items` section and on any invalid
    /// item entry; no partial item set is ever exposed. Custom entries
    /// whose key the registry cannot resolve are logged and skipped, so
    /// one bad key does not fail the table.
    pub fn from_document(
        name: &str,
        doc: &Document,
        registry: &dyn ItemRegistry,
    ) -> Result<Self, LootTableError> {
        if !doc.contains("Rolls") {
            return Err(LootTableError::MissingRolls);
        }
        let rolls = doc
            .get_i64("Rolls")
            .and_then(|r| u32::try_from(r).ok())
            .ok_or(LootTableError::InvalidRolls)?;

        let ids = doc
            .section_keys("Items")
            .ok_or(LootTableError::MissingItems)?;

        let mut items = Vec::new();
        let mut sampler = WeightedSampler::new();
        for id in ids {
            let item = LootItem::parse(doc, &id)?;
            match item.resolve(registry) {
                Some(stack) => {
                    sampler.add(item.weight(), stack)?;
                    items.push(item);
                }
                None => {
                    warn!(
                        table = %name,
                        item = %id,
                        "cannot find a custom item for this entry, skipping it"
                    );
                }
            }
        }

        Ok(Self {
            name: name.to_owned(),
            rolls,
            items,
            sampler,
        })
    }

    /// The table's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How many independent draws one spawn event makes.
    #[must_use]
    pub fn rolls(&self) -> u32 {
        self.rolls
    }

    /// Overrides the roll count. For programmatic callers (add-ons).
    pub fn set_rolls(&mut self, rolls: u32) {
        self.rolls = rolls;
    }

    /// The accepted entries, in definition order.
    #[must_use]
    pub fn items(&self) -> &[LootItem] {
        &self.items
    }

    /// True when every entry was skipped or the definition had none.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sampler.is_empty()
    }

    /// Draws one weighted-random resolved item.
    pub fn draw_one<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<ItemStack, LootTableError> {
        Ok(self.sampler.sample(rng)?.clone())
    }
}
