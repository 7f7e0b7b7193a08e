// ABOUTME: Include bookkeeping scoped to a single top-level preprocessing run
// ABOUTME: Remembers which origin key last included each file

use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone)]
pub struct IncludeContext {
    included: HashMap<PathBuf, String>,
}

impl IncludeContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Origin key in the form `label[line]`
    pub fn key(label: &str, line: usize) -> String {
        format!("{label}[{line}]")
    }

    /// Record that `path` is included from `key`.
    /// Returns false if the exact same inclusion was already recorded.
    pub fn record(&mut self, path: &Path, key: &str) -> bool {
        if self.included.get(path).is_some_and(|k| k == key) {
            return false;
        }
        self.included.insert(path.to_path_buf(), key.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.included.len()
    }

    pub fn is_empty(&self) -> bool {
        self.included.is_empty()
    }
}
