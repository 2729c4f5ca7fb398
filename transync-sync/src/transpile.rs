//! Unit Transpile Driver.
//!
//! Each unit goes through the translator once and yields one body per target
//! tree. Nothing is written here: [`transpile_batch`] stages the whole batch
//! in memory so a translator failure on a later unit leaves every tree as it
//! was. Publishing is the orchestrator's job.

use std::path::PathBuf;

use transync_core::{ClassRegistry, SourceUnit, TargetTree, Translator, UnitId};

use crate::error::SyncError;

/// Translated outputs of one unit, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitOutput {
    pub unit: UnitId,
    pub class_name: String,
    pub base_class: String,
    /// `(path, body)` per target tree, in tree order.
    pub files: Vec<(PathBuf, String)>,
}

/// Every unit of a run, translated and staged.
#[derive(Debug, Clone, Default)]
pub struct StagedBatch {
    pub registry: ClassRegistry,
    pub files: Vec<(PathBuf, String)>,
}

/// Translate one unit and derive its output path in every tree.
pub fn transpile_unit(
    unit: &SourceUnit,
    translator: &dyn Translator,
    trees: &[TargetTree],
) -> Result<UnitOutput, SyncError> {
    tracing::info!("transpiling from {}", unit.path.display());

    let result = translator.translate_unit(&unit.raw_text).map_err(|e| {
        tracing::error!("failed to transpile source code from {}", unit.path.display());
        SyncError::Translation {
            unit: unit.id.clone(),
            source: e,
        }
    })?;

    let files = trees
        .iter()
        .map(|tree| {
            (
                tree.output_path(&unit.id),
                result.bodies.get(tree.dialect).to_string(),
            )
        })
        .collect();

    Ok(UnitOutput {
        unit: unit.id.clone(),
        class_name: result.class_name,
        base_class: result.base_class,
        files,
    })
}

/// Translate `units` in order, building a fresh [`ClassRegistry`].
///
/// Aborts on the first translator failure or duplicate class name.
pub fn transpile_batch(
    units: &[SourceUnit],
    translator: &dyn Translator,
    trees: &[TargetTree],
) -> Result<StagedBatch, SyncError> {
    let mut batch = StagedBatch::default();
    for unit in units {
        let output = transpile_unit(unit, translator, trees)?;
        if !batch.registry.insert(&output.class_name, &output.base_class) {
            return Err(SyncError::DuplicateClass {
                class_name: output.class_name,
                unit: output.unit,
            });
        }
        batch.files.extend(output.files);
    }
    Ok(batch)
}
