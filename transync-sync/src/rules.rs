//! Ordered pattern/replacement tables applied to canonical fixtures before
//! they reach the translator.

use regex::NoExpand;

use crate::error::{compile, SyncError};

/// One source rewrite.
///
/// A `required` rule that matches nothing means the canonical fixture no
/// longer looks the way the table expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteRule {
    pub pattern: &'static str,
    pub replacement: &'static str,
    pub required: bool,
}

impl RewriteRule {
    pub const fn required(pattern: &'static str, replacement: &'static str) -> Self {
        Self {
            pattern,
            replacement,
            required: true,
        }
    }

    pub const fn optional(pattern: &'static str, replacement: &'static str) -> Self {
        Self {
            pattern,
            replacement,
            required: false,
        }
    }
}

/// Apply `rules` in order, each to every match of its pattern.
///
/// Replacements are literal. `fixture` only labels diagnostics.
pub fn apply_rules(fixture: &str, text: &str, rules: &[RewriteRule]) -> Result<String, SyncError> {
    let mut current = text.to_string();
    for rule in rules {
        let re = compile(rule.pattern)?;
        let matches = re.find_iter(&current).count();
        if matches == 0 {
            if rule.required {
                return Err(SyncError::RuleDrift {
                    fixture: fixture.to_string(),
                    pattern: rule.pattern.to_string(),
                });
            }
            tracing::debug!("{fixture}: /{}/ matched nothing", rule.pattern);
            continue;
        }
        tracing::debug!("{fixture}: /{}/ matched {matches} time(s)", rule.pattern);
        current = re.replace_all(&current, NoExpand(rule.replacement)).into_owned();
    }
    Ok(current)
}
