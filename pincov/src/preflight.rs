//! Pre-flight checks for pincov
//!
//! Validates that every input file of a run exists before any parsing
//! starts, so a missing file never leaves a half-written report behind.

use crate::config::InputPaths;
use crate::domain::{CoverageError, RecordKind};
use std::path::Path;

/// Check the log, its module manifest and the record log for `kind`.
///
/// # Errors
/// Returns [`CoverageError::LogFileMissing`] for the first file that is absent.
pub fn check_inputs(paths: &InputPaths, kind: RecordKind) -> Result<(), CoverageError> {
    check_file(&paths.log, "input file")?;
    check_file(&paths.modules, "modules log")?;
    check_file(paths.records(kind), kind.log_description())?;
    Ok(())
}

fn check_file(path: &Path, what: &'static str) -> Result<(), CoverageError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CoverageError::LogFileMissing { what, path: path.to_path_buf() })
    }
}
