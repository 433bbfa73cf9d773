//! Weighted loot resolution engine for the structcraft core.
//!
//! Loads declarative loot table definitions, validates them, and answers
//! repeated "give me one random item" queries according to per-item
//! integer weights. Entries are either described inline or reference an
//! externally registered custom item through the [`ItemRegistry`] seam.
//!
//! Tables are immutable after construction and hold no locks; sharing
//! them across threads is the host's concern.

mod error;
mod handler;
mod item;
mod registry;
mod sampler;
mod table;

pub use error::LootTableError;
pub use handler::LootTableHandler;
pub use item::{ItemStack, LootItem};
pub use registry::{ItemRegistry, NoCustomItems};
pub use sampler::{SamplerError, WeightedSampler};
pub use table::LootTable;
