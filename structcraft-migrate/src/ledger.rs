//! The backup ledger: the migration engine's durable checkpoint record.
//!
//! A small YAML file (`.backups`) inside the backup directory holding the
//! version step the backups belong to (`backupVer`) and the names of
//! structures already migrated for that step (`UpdatedStructures`). Every
//! mutation is persisted synchronously before control returns, so a crash
//! between files never loses or repeats completed work.

use std::path::{Path, PathBuf};

use structcraft_config::Document;

use crate::error::{MigrateError, MigrateResult};

const VERSION_KEY: &str = "backupVer";
const MIGRATED_KEY: &str = "UpdatedStructures";

/// Append-only record of migration progress for one version step.
#[derive(Debug)]
pub struct BackupLedger {
    path: PathBuf,
    version: Option<u32>,
    migrated: Vec<String>,
}

impl BackupLedger {
    /// Opens the ledger file, creating an empty one if absent.
    ///
    /// Failure to create the file is fatal for the run.
    pub fn open(path: impl Into<PathBuf>) -> MigrateResult<Self> {
        let path = path.into();
        if path.exists() {
            let doc = Document::load(&path)?;
            let version = doc
                .get_i64(VERSION_KEY)
                .and_then(|v| u32::try_from(v).ok());
            let migrated = doc.get_str_list(MIGRATED_KEY);
            Ok(Self {
                path,
                version,
                migrated,
            })
        } else {
            let ledger = Self {
                path,
                version: None,
                migrated: Vec::new(),
            };
            ledger.persist()?;
            Ok(ledger)
        }
    }

    /// Declares the version step this run applies.
    ///
    /// A ledger already stamped with a different step is stale backup data
    /// and aborts the run. An unstamped ledger is stamped and persisted
    /// immediately, so a crash right after this call is still consistent.
    pub fn declare_version(&mut self, step: u32) -> MigrateResult<()> {
        match self.version {
            Some(found) if found != step => Err(MigrateError::StaleBackup {
                found,
                expected: step,
            }),
            Some(_) => Ok(()),
            None => {
                self.version = Some(step);
                self.persist()
            }
        }
    }

    /// The declared backup version, if any.
    #[must_use]
    pub fn version(&self) -> Option<u32> {
        self.version
    }

    /// Returns true if the named structure is already checkpointed.
    #[must_use]
    pub fn is_migrated(&self, name: &str) -> bool {
        self.migrated.iter().any(|m| m == name)
    }

    /// The structures checkpointed so far, in completion order.
    #[must_use]
    pub fn migrated(&self) -> &[String] {
        &self.migrated
    }

    /// The number of structures checkpointed so far.
    #[must_use]
    pub fn migrated_count(&self) -> usize {
        self.migrated.len()
    }

    /// Checkpoints a structure as migrated and persists before returning.
    pub fn record_migrated(&mut self, name: &str) -> MigrateResult<()> {
        self.migrated.push(name.to_owned());
        self.persist()
    }

    /// Re-stamps the ledger for the next step, clearing the checkpoints.
    ///
    /// Only valid when the previous step fully completed in the same run;
    /// the engine owns that check. Stale data from another run must go
    /// through [`BackupLedger::declare_version`] instead.
    pub fn reset_for(&mut self, step: u32) -> MigrateResult<()> {
        self.version = Some(step);
        self.migrated.clear();
        self.persist()
    }

    /// The on-disk location of the ledger.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> MigrateResult<()> {
        let mut doc = Document::new();
        if let Some(version) = self.version {
            doc.set(VERSION_KEY, i64::from(version));
        }
        doc.set_str_list(MIGRATED_KEY, &self.migrated);
        doc.save(&self.path)?;
        Ok(())
    }
}
