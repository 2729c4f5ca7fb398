//! # transync-sync
//!
//! Keeps the generated Python 2, Python 3 async and PHP trees, and the shared
//! artifacts derived from the canonical JS sources, in step with those
//! sources.
//!
//! Call [`run`] for a full pass or [`diff_plan`] to preview one. The building
//! blocks are public for callers that need a single step:
//!
//! - [`resolve`] picks the allow-listed units,
//! - [`transpile`] translates them into staged outputs,
//! - [`prune`] deletes generated files of units that are gone,
//! - [`manifest`] rewrites the `export class` block of the declarations file,
//! - [`fixtures`] synchronizes the derived test fixtures and error hierarchy,
//! - [`async_sync`] derives the blocking sample script,
//! - [`writer`] is the identical-content-skipping atomic writer they share.

pub mod async_sync;
pub mod diff;
pub mod error;
pub mod fixtures;
pub mod manifest;
pub mod pipeline;
pub mod prune;
pub mod resolve;
pub mod rules;
pub mod transpile;
pub mod writer;

pub use diff::{diff_plan, FileDiff};
pub use error::SyncError;
pub use pipeline::{run, SyncOptions, SyncOutcome, SyncReport};
pub use prune::PruneResult;
pub use writer::WriteResult;
