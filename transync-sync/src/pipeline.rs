//! Sync pipeline entrypoint used by the CLI.
//!
//! One run, fail-fast:
//!
//! 1. resolve the target trees and make sure their roots exist,
//! 2. resolve the allow-listed units (empty ⇒ [`SyncOutcome::NoMatch`]),
//! 3. translate every unit into staged outputs and the class registry,
//! 4. publish the staged outputs,
//! 5. prune every target tree,
//! 6. export the type declarations,
//! 7. synchronize the derived fixtures,
//! 8. derive the synchronous sample script.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use transync_core::{allow_list, ClassRegistry, Layout, Translator, UnitId};
use transync_render::TemplateEngine;

use crate::async_sync::sync_async_sample;
use crate::error::{io_err, SyncError};
use crate::fixtures::{sync_fixture, FIXTURES};
use crate::manifest::export_declarations;
use crate::prune::{prune_tree, PruneResult};
use crate::resolve::resolve_units;
use crate::transpile::transpile_batch;
use crate::writer::{atomic_write, WriteResult};

/// Options for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Restrict the batch to one unit (`kraken` or `kraken.js`).
    pub filter: Option<String>,
    pub dry_run: bool,
}

/// Everything a completed run did (or, in dry-run, would do).
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub started_at: DateTime<Utc>,
    pub dry_run: bool,
    pub units: Vec<UnitId>,
    pub registry: ClassRegistry,
    pub writes: Vec<WriteResult>,
    pub pruned: Vec<PruneResult>,
}

impl SyncReport {
    /// Writes that changed (or would change) a file.
    pub fn changed(&self) -> impl Iterator<Item = &WriteResult> {
        self.writes.iter().filter(|w| w.is_change())
    }

    pub fn unchanged_count(&self) -> usize {
        self.writes.iter().filter(|w| !w.is_change()).count()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// No allow-listed unit matched; nothing was touched.
    NoMatch,
    Synced(SyncReport),
}

/// Run the whole pipeline for the repository at `root`.
pub fn run(
    root: &Path,
    layout: &Layout,
    translator: &dyn Translator,
    options: &SyncOptions,
) -> Result<SyncOutcome, SyncError> {
    let started_at = Utc::now();
    let dry_run = options.dry_run;

    let trees = layout.target_trees_at(root)?;
    if !dry_run {
        for tree in &trees {
            std::fs::create_dir_all(&tree.root).map_err(|e| io_err(&tree.root, e))?;
        }
    }

    let allow_path = layout.allow_list_at(root);
    let allow = allow_list::load_from(&allow_path)?;
    if allow.is_empty() {
        tracing::warn!("{} permits no units", allow_path.display());
    }
    let units = resolve_units(
        &layout.source_dir_at(root),
        &layout.source.extension,
        &allow,
        options.filter.as_deref(),
    )?;
    if units.is_empty() {
        tracing::warn!("0 files transpiled");
        return Ok(SyncOutcome::NoMatch);
    }

    let engine = TemplateEngine::with_overrides(Some(&layout.templates_at(root)))?;

    let batch = transpile_batch(&units, translator, &trees)?;

    let mut writes = Vec::new();
    for (path, body) in &batch.files {
        writes.push(atomic_write(path, body, dry_run)?);
    }

    let mut pruned = Vec::new();
    for tree in &trees {
        pruned.extend(prune_tree(tree, &batch.registry, dry_run)?);
    }

    writes.push(export_declarations(
        &layout.declarations_at(root),
        &batch.registry,
        dry_run,
    )?);

    for fixture in FIXTURES {
        writes.extend(sync_fixture(root, fixture, translator, &engine, dry_run)?);
    }

    writes.push(sync_async_sample(root, &layout.async_sample, dry_run)?);

    let report = SyncReport {
        started_at,
        dry_run,
        units: units.into_iter().map(|u| u.id).collect(),
        registry: batch.registry,
        writes,
        pruned,
    };
    tracing::info!(
        "{} units transpiled, {} files changed, {} unchanged, {} pruned",
        report.units.len(),
        report.changed().count(),
        report.unchanged_count(),
        report.pruned.len()
    );
    Ok(SyncOutcome::Synced(report))
}
