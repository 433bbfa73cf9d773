//! Config document layer for the structcraft core.
//!
//! Structure definitions, loot tables, the backup ledger, and the global
//! config are all hierarchical YAML documents. This crate models them as a
//! typed, validated key/value tree with explicit accessor contracts
//! (`require_*` returns a precise error, `get_*` returns an option or
//! default), keeping the migration rules and loot parsing independent of
//! the serialization library.

mod core_config;
mod document;
mod error;

pub use core_config::CoreConfig;
pub use document::Document;
pub use error::{ConfigError, ConfigResult};
