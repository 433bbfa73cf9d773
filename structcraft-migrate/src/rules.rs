//! Version-specific rewrite rules for structure definitions.
//!
//! Each rule is a pure transformation of an in-memory [`Document`]; the
//! engine owns all file IO around it. Rules are registered in
//! [`migration_steps`] in ascending target-version order and each takes a
//! document from version `n - 1` to version `n`.

use structcraft_config::Document;
use thiserror::Error;

/// A rule's view of a malformed document.
///
/// The engine wraps this with the offending file's name.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    /// A key the rewrite depends on is absent.
    #[error("missing required key: {0}")]
    MissingKey(String),
}

/// One schema-version migration step.
pub struct MigrationStep {
    /// The version a document is at after this step.
    pub to_version: u32,
    /// The pure rewrite applied to each structure document.
    pub rule: fn(&mut Document) -> Result<(), RuleError>,
}

static STEPS: [MigrationStep; 2] = [
    MigrationStep {
        to_version: 7,
        rule: convert_spawn_y,
    },
    MigrationStep {
        to_version: 8,
        rule: capitalize_sub_schematic_file,
    },
];

/// The ordered table of supported migration steps.
#[must_use]
pub fn migration_steps() -> &'static [MigrationStep] {
    &STEPS
}

const SPAWN_Y: &str = "StructureLocation.SpawnY";
const SPAWN_Y_HEIGHT_MAP: &str = "StructureLocation.SpawnYHeightMap";
const SUB_SCHEMATICS: &str = "SubSchematics.Schematics";

/// Step 6 -> 7: split the legacy spawn-height token into `SpawnY` plus the
/// new `SpawnYHeightMap` selector.
///
/// `ocean_floor` becomes `SpawnY: top` with an `OCEAN_FLOOR` height map;
/// every other value is kept as-is and pinned to `WORLD_SURFACE`.
pub fn convert_spawn_y(doc: &mut Document) -> Result<(), RuleError> {
    let spawn_y = doc
        .get_scalar_string(SPAWN_Y)
        .ok_or_else(|| RuleError::MissingKey(SPAWN_Y.to_owned()))?;

    if spawn_y.trim().eq_ignore_ascii_case("ocean_floor") {
        doc.set(SPAWN_Y, "top");
        doc.set(SPAWN_Y_HEIGHT_MAP, "OCEAN_FLOOR");
    } else {
        doc.set(SPAWN_Y_HEIGHT_MAP, "WORLD_SURFACE");
    }
    Ok(())
}

/// Step 7 -> 8: rename the lower-case `file` field of every sub-schematic
/// entry to the canonical `File`.
///
/// Documents without a `SubSchematics.Schematics` section pass through
/// untouched. An entry missing `file` is a malformed document and aborts
/// the step.
pub fn capitalize_sub_schematic_file(doc: &mut Document) -> Result<(), RuleError> {
    let Some(ids) = doc.section_keys(SUB_SCHEMATICS) else {
        return Ok(());
    };

    for id in ids {
        let file_key = format!("{SUB_SCHEMATICS}.{id}.file");
        let file = doc
            .get_scalar_string(&file_key)
            .ok_or_else(|| RuleError::MissingKey(file_key.clone()))?;
        doc.set(&format!("{SUB_SCHEMATICS}.{id}.File"), file);
        doc.remove(&file_key);
    }
    Ok(())
}
