//! Versioned migration engine for on-disk structure definitions.
//!
//! Upgrades structure definition files across incompatible schema
//! versions, one version step at a time, with an unconditional backup
//! before every mutation and a durably persisted per-file checkpoint
//! (the backup ledger). An interrupted run never corrupts data or
//! silently skips files: restarting resumes from the checkpoint, and a
//! ledger stamped by a different step aborts with instructions to delete
//! the stale backups.
//!
//! The engine is synchronous and runs once off the host's startup hook,
//! before structures or loot tables are loaded.

mod backup;
mod engine;
mod error;
mod gate;
mod ledger;
mod rules;

pub use backup::back_up_file;
pub use engine::{
    MigrationEngine, MigrationReport, CURRENT_CONFIG_VERSION, OLDEST_MIGRATABLE_VERSION,
};
pub use error::{MigrateError, MigrateResult};
pub use gate::{NoWait, ResumeGate, ShutdownGate, ShutdownHandle, WaitOutcome};
pub use ledger::BackupLedger;
pub use rules::{
    capitalize_sub_schematic_file, convert_spawn_y, migration_steps, MigrationStep, RuleError,
};
