//! The externally maintained allow-list of unit ids (`exchanges.json`).

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::{io_err, ConfigError};
use crate::types::UnitId;

/// Ordered set of permitted unit ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    ids: Vec<UnitId>,
}

#[derive(Debug, Deserialize)]
struct AllowListFile {
    ids: Vec<String>,
}

impl AllowList {
    /// Build an allow-list, rejecting duplicated ids.
    pub fn new<I, S>(ids: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for id in ids {
            let id = id.into();
            if !seen.insert(id.clone()) {
                return Err(ConfigError::DuplicateId(id));
            }
            out.push(UnitId(id));
        }
        Ok(Self { ids: out })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|allowed| allowed.0 == id)
    }

    pub fn ids(&self) -> &[UnitId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Read `{ "ids": [...] }` from `path`.
pub fn load_from(path: &Path) -> Result<AllowList, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let file: AllowListFile =
        serde_json::from_str(&contents).map_err(|e| ConfigError::AllowList {
            path: path.to_path_buf(),
            source: e,
        })?;
    AllowList::new(file.ids)
}
