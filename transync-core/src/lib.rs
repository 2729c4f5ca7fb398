//! transync core library: domain types, layout configuration, allow-list,
//! and the Translator seam.
//!
//! - [`types`]: newtypes and domain structs
//! - [`error`]: [`ConfigError`], [`TranslateError`]
//! - [`layout`]: `transync.yaml` load / path resolution
//! - [`allow_list`]: `exchanges.json`
//! - [`translator`]: [`Translator`] trait and [`CommandTranslator`]

pub mod allow_list;
pub mod error;
pub mod layout;
pub mod translator;
pub mod types;

pub use allow_list::AllowList;
pub use error::{ConfigError, TranslateError};
pub use layout::Layout;
pub use translator::{CommandTranslator, Translator};
pub use types::{
    ClassRegistry, Dialect, DialectBodies, FragmentOptions, SourceUnit, TargetTree,
    TranslationResult, UnitId,
};
