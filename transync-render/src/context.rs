//! Banner context: serializable rendering payload for preambles and headers.

use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// Where contributors are sent by the "do not edit" notice.
pub const CONTRIBUTING_URL: &str =
    "https://github.com/ccxt/ccxt/blob/master/CONTRIBUTING.md#how-to-contribute-code";

/// Payload available to every banner template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerContext {
    /// Canonical source of the generated file, relative to the repository root.
    pub source: String,
    pub contributing_url: String,
}

impl BannerContext {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into().replace('\\', "/"),
            contributing_url: CONTRIBUTING_URL.to_string(),
        }
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        Ok(tera::Context::from_serialize(self)?)
    }
}
