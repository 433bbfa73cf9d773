//! The global core configuration document.
//!
//! Exposes the installed schema version (`configversion`) and the working
//! set of structure names (`Structures`) that the migration engine and
//! structure loader both consume.

use std::path::{Path, PathBuf};

use crate::document::Document;
use crate::error::{ConfigError, ConfigResult};

/// The global configuration file for the structure core.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    path: PathBuf,
    doc: Document,
}

impl CoreConfig {
    /// Loads the core config from a YAML file.
    pub fn load(path: impl Into<PathBuf>) -> ConfigResult<Self> {
        let path = path.into();
        let doc = Document::load(&path)?;
        Ok(Self { path, doc })
    }

    /// The on-disk location of this config.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The underlying document, for host-specific settings.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// The installed schema version (`configversion`).
    pub fn config_version(&self) -> ConfigResult<u32> {
        let version = self.doc.require_i64("configversion")?;
        u32::try_from(version).map_err(|_| ConfigError::WrongType {
            path: "configversion".to_owned(),
            expected: "non-negative integer",
        })
    }

    /// Sets the installed schema version. Call [`CoreConfig::save`] to persist.
    pub fn set_config_version(&mut self, version: u32) {
        self.doc.set("configversion", i64::from(version));
    }

    /// The registered structure names (`Structures`).
    #[must_use]
    pub fn structure_names(&self) -> Vec<String> {
        self.doc.get_str_list("Structures")
    }

    /// Persists the config back to its file.
    pub fn save(&self) -> ConfigResult<()> {
        self.doc.save(&self.path)
    }
}
