//! The migration driver.
//!
//! Runs once, serially, during host startup, and must complete (or fatally
//! abort) before any structure or loot table is loaded. Per-file progress
//! is checkpointed through the [`BackupLedger`] so a rerun after an abort
//! resumes exactly where the previous attempt stopped.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use structcraft_config::{CoreConfig, Document};
use tracing::{info, warn};

use crate::backup::back_up_file;
use crate::error::{MigrateError, MigrateResult};
use crate::gate::{ResumeGate, WaitOutcome};
use crate::ledger::BackupLedger;
use crate::rules::{migration_steps, MigrationStep, RuleError};

/// The schema version this release writes.
pub const CURRENT_CONFIG_VERSION: u32 = 8;

/// The oldest schema version this release can still migrate.
pub const OLDEST_MIGRATABLE_VERSION: u32 = 6;

const DEFAULT_RESUME_WINDOW: Duration = Duration::from_secs(5);

/// Summary of one migration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// Installed version before the run.
    pub from_version: u32,
    /// Target version of the run.
    pub to_version: u32,
    /// Version steps applied, in order.
    pub steps_applied: Vec<u32>,
    /// Structure files rewritten across all steps.
    pub files_migrated: usize,
}

impl MigrationReport {
    fn new(from_version: u32, to_version: u32) -> Self {
        Self {
            from_version,
            to_version,
            steps_applied: Vec::new(),
            files_migrated: 0,
        }
    }

    /// True when the installed version was already current.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.steps_applied.is_empty()
    }
}

/// Drives every pending version step over the registered structure files.
pub struct MigrationEngine<'a, G: ResumeGate> {
    data_dir: PathBuf,
    config: &'a mut CoreConfig,
    gate: G,
    resume_window: Duration,
}

impl<'a, G: ResumeGate> MigrationEngine<'a, G> {
    /// Creates an engine over the host data directory.
    ///
    /// `data_dir` is expected to contain the `structures/` directory; the
    /// `backup/` directory is created on demand next to it.
    pub fn new(data_dir: impl Into<PathBuf>, config: &'a mut CoreConfig, gate: G) -> Self {
        Self {
            data_dir: data_dir.into(),
            config,
            gate,
            resume_window: DEFAULT_RESUME_WINDOW,
        }
    }

    /// Overrides the operator-cancellable resume window.
    #[must_use]
    pub fn with_resume_window(mut self, window: Duration) -> Self {
        self.resume_window = window;
        self
    }

    /// Runs every step between the installed version and
    /// [`CURRENT_CONFIG_VERSION`], in order.
    ///
    /// An already-current installation is a no-op. A version older than
    /// [`OLDEST_MIGRATABLE_VERSION`] fails with [`MigrateError::TooOld`]
    /// before touching any file. Any abort leaves completed checkpoints in
    /// the ledger; rerunning after the operator fixes the cause resumes
    /// from there.
    pub fn run(&mut self) -> MigrateResult<MigrationReport> {
        let installed = self.config.config_version()?;
        let mut report = MigrationReport::new(installed, CURRENT_CONFIG_VERSION);

        if installed >= CURRENT_CONFIG_VERSION {
            return Ok(report);
        }
        if installed < OLDEST_MIGRATABLE_VERSION {
            return Err(MigrateError::TooOld {
                installed,
                oldest: OLDEST_MIGRATABLE_VERSION,
            });
        }

        info!(
            from = installed,
            to = CURRENT_CONFIG_VERSION,
            "older structure config format detected; converting"
        );

        let mut just_completed = None;
        for step in migration_steps() {
            if step.to_version <= installed {
                continue;
            }
            self.apply_step(step, just_completed, &mut report)?;
            just_completed = Some(step.to_version);
            self.config.set_config_version(step.to_version);
            self.config.save()?;
            info!(
                version = step.to_version,
                "updated all structure files to config version"
            );
        }

        Ok(report)
    }

    fn apply_step(
        &mut self,
        step: &MigrationStep,
        just_completed: Option<u32>,
        report: &mut MigrationReport,
    ) -> MigrateResult<()> {
        let structures_dir = self.data_dir.join("structures");
        if !structures_dir.is_dir() {
            return Err(MigrateError::MissingStructuresDir(structures_dir));
        }

        let backup_dir = self.data_dir.join("backup");
        fs::create_dir_all(&backup_dir)?;

        let mut ledger = BackupLedger::open(backup_dir.join(".backups"))?;
        if ledger.version().is_some() && ledger.version() == just_completed {
            // Our own ledger from the step this run just finished; the
            // backups it guards are exactly this step's inputs.
            ledger.reset_for(step.to_version)?;
        } else {
            ledger.declare_version(step.to_version)?;
        }

        if ledger.migrated_count() > 0 {
            warn!(
                completed = ledger.migrated_count(),
                window_secs = self.resume_window.as_secs(),
                "previous migration attempt detected; waiting before resuming. \
                 Stop the server now if this backup data should be deleted instead"
            );
            if self.gate.wait(self.resume_window) == WaitOutcome::Cancelled {
                info!("shutdown detected, stopping the migration");
                return Err(MigrateError::Cancelled);
            }
        }

        back_up_file(self.config.path(), &backup_dir.join("config.yml.backup"))?;

        for name in self.config.structure_names() {
            if ledger.is_migrated(&name) {
                continue;
            }

            let src = structures_dir.join(format!("{name}.yml"));
            back_up_file(&src, &backup_dir.join(format!("{name}.yml.backup")))?;

            let mut doc = Document::load(&src)?;
            (step.rule)(&mut doc).map_err(|err| match err {
                RuleError::MissingKey(key) => MigrateError::MissingField {
                    file: name.clone(),
                    key,
                },
            })?;
            doc.save(&src)
                .map_err(|source| MigrateError::SaveFailed {
                    file: name.clone(),
                    source,
                })?;

            // Durable checkpoint before moving to the next file.
            ledger.record_migrated(&name)?;
            report.files_migrated += 1;
            info!(structure = %name, "successfully updated structure");
        }

        report.steps_applied.push(step.to_version);
        Ok(())
    }
}
