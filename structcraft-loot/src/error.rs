//! Error types for loot tables.

use structcraft_config::ConfigError;
use thiserror::Error;

use crate::sampler::SamplerError;

/// Errors raised while loading or drawing from a loot table.
///
/// All of these are scoped to one table; other tables are unaffected.
#[derive(Debug, Error)]
pub enum LootTableError {
    /// The backing definition file does not exist.
    #[error("cannot find loot table file: {0}")]
    NotFound(String),

    /// The definition could not be read or parsed.
    #[error("invalid loot table configuration: {0}")]
    Config(#[from] ConfigError),

    /// The global `Rolls` setting is absent.
    #[error("invalid loot table format: cannot find the global 'Rolls' setting")]
    MissingRolls,

    /// `Rolls` is present but not a non-negative integer.
    #[error("invalid loot table format: 'Rolls' must be a non-negative integer")]
    InvalidRolls,

    /// The `Items` section is absent.
    #[error("invalid loot table format: the 'Items' section is required")]
    MissingItems,

    /// A per-item required field is absent.
    #[error("cannot find '{field}' setting for item: {item}")]
    MissingField { item: String, field: &'static str },

    /// A per-item weight is missing, non-integer, zero, or negative.
    #[error("'Weight' must be a positive integer for item: {item}")]
    InvalidWeight { item: String },

    /// Weighted sampling failed (for instance, an empty table).
    #[error(transparent)]
    Sampler(#[from] SamplerError),
}
