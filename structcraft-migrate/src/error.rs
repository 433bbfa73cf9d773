//! Error types for the migration engine.

use std::path::PathBuf;

use structcraft_config::ConfigError;
use thiserror::Error;

/// Result type for migration operations.
pub type MigrateResult<T> = Result<T, MigrateError>;

/// Errors that can occur while migrating structure definitions.
///
/// Run-scoped failures stop the whole migration; completed per-file
/// checkpoints stay in the ledger so an operator can fix the cause and
/// restart to resume.
#[derive(Debug, Error)]
pub enum MigrateError {
    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config document error.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The installed version predates the oldest supported migration step.
    #[error(
        "config version {installed} is too old to migrate (oldest supported is {oldest}); \
         update with an older release first"
    )]
    TooOld { installed: u32, oldest: u32 },

    /// The structures directory does not exist.
    #[error("structures directory not found: {0}")]
    MissingStructuresDir(PathBuf),

    /// A pre-mutation backup copy could not be made.
    #[error("unable to create a backup for {file}: {source}")]
    BackupFailed {
        file: String,
        source: std::io::Error,
    },

    /// The backup ledger was written by a different migration step.
    #[error(
        "backup data is for config version {found} but version {expected} is being applied; \
         delete the backup folder before continuing"
    )]
    StaleBackup { found: u32, expected: u32 },

    /// A structure file lacks a field the step's rewrite requires.
    #[error("structure {file} is missing required key {key}")]
    MissingField { file: String, key: String },

    /// The rewritten structure file could not be persisted.
    #[error("unable to save updated structure {file}: {source}")]
    SaveFailed { file: String, source: ConfigError },

    /// The operator cancelled the resume delay window.
    #[error("shutdown detected during the resume window; migration stopped")]
    Cancelled,
}
