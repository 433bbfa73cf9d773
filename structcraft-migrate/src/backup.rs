//! Pre-mutation file backup.

use std::fs;
use std::path::Path;

use crate::error::{MigrateError, MigrateResult};

/// Copies `src` to `dest` before `src` is mutated.
///
/// Parent directories of `dest` are created as needed. Any failure is
/// surfaced as [`MigrateError::BackupFailed`] naming the source file; the
/// caller must abort the run without marking the file migrated.
pub fn back_up_file(src: &Path, dest: &Path) -> MigrateResult<()> {
    let file = src.display().to_string();
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|source| MigrateError::BackupFailed {
            file: file.clone(),
            source,
        })?;
    }
    fs::copy(src, dest).map_err(|source| MigrateError::BackupFailed { file, source })?;
    Ok(())
}
