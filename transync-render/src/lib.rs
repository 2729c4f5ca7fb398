//! # transync-render
//!
//! Tera-based renderer for the banners prepended to generated fixtures: a
//! per-dialect preamble (do-not-edit notice plus path bootstrap) and an
//! optional per-fixture header bridging fixture-local helper names to the
//! generated library surface.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use transync_core::Dialect;
//! use transync_render::{BannerContext, TemplateEngine};
//!
//! fn crypto_banner() -> Option<String> {
//!     let engine = TemplateEngine::new().ok()?;
//!     let ctx = BannerContext::new("js/test/base/functions/test.crypto.js");
//!     engine
//!         .render_banner(Dialect::Php, Some("header/crypto.php.tera"), &ctx)
//!         .ok()
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::BannerContext;
pub use engine::{preamble_name, TemplateEngine};
pub use error::RenderError;
