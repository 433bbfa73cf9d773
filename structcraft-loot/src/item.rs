//! Loot item declarations and their resolution to concrete items.

use std::collections::BTreeMap;

use structcraft_config::Document;

use crate::error::LootTableError;
use crate::registry::ItemRegistry;

/// A concrete, fully resolved game item handed to the host for spawning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStack {
    /// Host material/type identifier (e.g. `DIAMOND_SWORD`).
    pub material: String,
    /// Optional display name.
    pub name: Option<String>,
    /// Amount as declared (a count or a host-interpreted range like `1-3`).
    pub amount: String,
    /// Lore lines, in order.
    pub lore: Vec<String>,
    /// Enchantment name to level, as declared.
    pub enchantments: BTreeMap<String, String>,
}

impl ItemStack {
    /// Creates a bare item with no name, lore, or enchantments.
    #[must_use]
    pub fn new(material: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            name: None,
            amount: amount.into(),
            lore: Vec::new(),
            enchantments: BTreeMap::new(),
        }
    }
}

/// One declarative entry of a loot table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LootItem {
    /// A reference to an externally registered custom item.
    Custom {
        key: String,
        amount: String,
        weight: u32,
    },
    /// An item fully described inline.
    Inline {
        name: Option<String>,
        material: String,
        amount: String,
        weight: u32,
        lore: Vec<String>,
        enchantments: BTreeMap<String, String>,
    },
}

impl LootItem {
    /// The entry's sampling weight.
    #[must_use]
    pub fn weight(&self) -> u32 {
        match self {
            Self::Custom { weight, .. } | Self::Inline { weight, .. } => *weight,
        }
    }

    /// Parses and validates the item with the given id from a loot table
    /// document.
    ///
    /// Every entry must declare `Amount`, `Weight` (a positive integer),
    /// and `Type`; a `CUSTOM` type additionally requires `Key`. Failures
    /// name the offending item id.
    pub fn parse(doc: &Document, id: &str) -> Result<Self, LootTableError> {
        let base = format!("Items.{id}");

        let amount = doc
            .get_scalar_string(&format!("{base}.Amount"))
            .ok_or_else(|| LootTableError::MissingField {
                item: id.to_owned(),
                field: "Amount",
            })?;
        let ty = doc
            .get_scalar_string(&format!("{base}.Type"))
            .ok_or_else(|| LootTableError::MissingField {
                item: id.to_owned(),
                field: "Type",
            })?;

        let weight_path = format!("{base}.Weight");
        if !doc.contains(&weight_path) {
            return Err(LootTableError::MissingField {
                item: id.to_owned(),
                field: "Weight",
            });
        }
        let weight = doc
            .get_i64(&weight_path)
            .and_then(|w| u32::try_from(w).ok())
            .filter(|w| *w > 0)
            .ok_or_else(|| LootTableError::InvalidWeight {
                item: id.to_owned(),
            })?;

        if ty.eq_ignore_ascii_case("CUSTOM") {
            let key = doc
                .get_scalar_string(&format!("{base}.Key"))
                .ok_or_else(|| LootTableError::MissingField {
                    item: id.to_owned(),
                    field: "Key",
                })?;
            return Ok(Self::Custom {
                key,
                amount,
                weight,
            });
        }

        let name = doc.get_scalar_string(&format!("{base}.Name"));
        let lore = doc.get_str_list(&format!("{base}.Lore"));

        let mut enchantments = BTreeMap::new();
        let ench_base = format!("{base}.Enchantments");
        if let Some(ench_names) = doc.section_keys(&ench_base) {
            for ench in ench_names {
                if let Some(level) = doc.get_scalar_string(&format!("{ench_base}.{ench}")) {
                    enchantments.insert(ench, level);
                }
            }
        }

        Ok(Self::Inline {
            name,
            material: ty,
            amount,
            weight,
            lore,
            enchantments,
        })
    }

    /// Resolves the entry into a concrete [`ItemStack`].
    ///
    /// Inline entries always resolve; custom entries resolve through the
    /// registry and return `None` for unknown keys (the caller decides
    /// whether that is a warning or an error).
    #[must_use]
    pub fn resolve(&self, registry: &dyn ItemRegistry) -> Option<ItemStack> {
        match self {
            Self::Custom { key, amount, .. } => registry.resolve(key).map(|mut stack| {
                stack.amount = amount.clone();
                stack
            }),
            Self::Inline {
                name,
                material,
                amount,
                lore,
                enchantments,
                ..
            } => Some(ItemStack {
                material: material.clone(),
                name: name.clone(),
                amount: amount.clone(),
                lore: lore.clone(),
                enchantments: enchantments.clone(),
            }),
        }
    }
}
