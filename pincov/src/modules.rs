//! Module manifest loading
//!
//! The instrumentation tool writes `<log>.modules` with one loaded image per
//! line:
//!
//! ```text
//! # ordinal:base:path
//! 0:00400000:C:\Program Files\Internet Explorer\iexplore.exe
//! 1:6b3a0000:C:\Windows\System32\ieframe.dll
//! ```
//!
//! Paths may themselves contain colons (drive letters), so everything after
//! the second colon is the path. Entries are keyed by lower-cased basename,
//! which is how symbol tokens (`ieframe.dll+1a2b`) refer to them.

use crate::domain::CoverageError;
use crate::parsing::lossy_lines;
use log::debug;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// A module listed in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleEntry {
    /// Lower-cased basename, the registry key
    pub name: String,
    /// Full on-disk path as recorded by the instrumentation tool
    pub path: String,
    /// Number of log tokens attributed to this module
    pub processed: u64,
}

/// Modules known for a run, keyed by lower-cased basename.
///
/// Iteration is ordered by key so the summary table is deterministic.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: BTreeMap<String, ModuleEntry>,
}

impl ModuleRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the manifest at `path`.
    ///
    /// # Errors
    /// Returns [`CoverageError::ManifestRead`] if the file cannot be opened or read.
    pub fn load(path: &Path) -> Result<Self, CoverageError> {
        let manifest_error =
            |source: std::io::Error| CoverageError::ManifestRead { path: path.to_path_buf(), source };

        let file = File::open(path).map_err(manifest_error)?;
        let registry = Self::from_reader(BufReader::new(file)).map_err(manifest_error)?;

        debug!("Loaded {} modules from {}", registry.len(), path.display());
        Ok(registry)
    }

    /// Build a registry from manifest text. Bytes that are not UTF-8 are
    /// replaced, so such paths still register under a lossy name.
    ///
    /// # Errors
    /// Returns an error if reading from `reader` fails.
    pub fn from_reader<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let mut registry = Self::new();
        for line in lossy_lines(reader) {
            registry.add_manifest_line(&line?);
        }
        Ok(registry)
    }

    /// Register one manifest line. Comments and short lines are ignored.
    ///
    /// A later line with the same basename replaces the earlier entry.
    pub fn add_manifest_line(&mut self, line: &str) {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.starts_with('#') {
            return;
        }

        let mut fields = line.splitn(3, ':');
        let (Some(_ordinal), Some(_base), Some(path)) = (fields.next(), fields.next(), fields.next())
        else {
            return;
        };

        let name = basename(path).to_lowercase();
        self.modules.insert(name.clone(), ModuleEntry { name, path: path.to_string(), processed: 0 });
    }

    /// Look up a module by lower-cased basename.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ModuleEntry> {
        self.modules.get(name)
    }

    /// Bump the processed counter of `name`. Returns false for unknown modules.
    pub fn increment_processed(&mut self, name: &str) -> bool {
        match self.modules.get_mut(name) {
            Some(entry) => {
                entry.processed += 1;
                true
            }
            None => false,
        }
    }

    /// All entries, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = &ModuleEntry> {
        self.modules.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// Final path component, splitting on both `/` and `\`.
fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}
