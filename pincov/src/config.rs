//! Run configuration
//!
//! Everything the pipeline needs to know about a run, passed explicitly
//! into it rather than kept in process-wide state.

use crate::domain::{RecordKind, SortOrder};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Options that shape the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub kind: RecordKind,
    pub sort_order: SortOrder,
    /// Lower-cased module name substrings; empty reports every module
    pub module_filters: Vec<String>,
    /// Report raw tokens without loading module symbols
    pub skip_symbols: bool,
}

impl ReportConfig {
    #[must_use]
    pub fn new(kind: RecordKind) -> Self {
        Self { kind, sort_order: SortOrder::default(), module_filters: Vec::new(), skip_symbols: false }
    }
}

/// Files belonging to one instrumentation run.
///
/// The tool writes `<log>`, `<log>.modules`, `<log>.routines` and
/// `<log>.blocks` side by side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    pub log: PathBuf,
    pub modules: PathBuf,
    pub routines: PathBuf,
    pub blocks: PathBuf,
}

impl InputPaths {
    #[must_use]
    pub fn from_log_path(log: &Path) -> Self {
        Self {
            log: log.to_path_buf(),
            modules: with_suffix(log, "modules"),
            routines: with_suffix(log, RecordKind::Routines.extension()),
            blocks: with_suffix(log, RecordKind::Blocks.extension()),
        }
    }

    /// Path of the log holding records of `kind`.
    #[must_use]
    pub fn records(&self, kind: RecordKind) -> &Path {
        match kind {
            RecordKind::Routines => &self.routines,
            RecordKind::Blocks => &self.blocks,
        }
    }
}

/// Append `.suffix` to the full file name (`run.log` → `run.log.modules`).
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}
