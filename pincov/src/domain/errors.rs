//! Structured error types for pincov
//!
//! Using thiserror for automatic Display implementation and error chaining.

use std::path::PathBuf;
use thiserror::Error;

/// A numeric field in a log line that could not be decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("invalid hexadecimal {field} {value:?}")]
    InvalidHex { field: &'static str, value: String },

    #[error("invalid decimal {field} {value:?}")]
    InvalidDecimal { field: &'static str, value: String },

    #[error("executed instruction total overflows")]
    InstructionOverflow,
}

#[derive(Error, Debug)]
pub enum CoverageError {
    #[error("Error while opening modules log {}", path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error while opening {what} {}", path.display())]
    LogFileMissing { what: &'static str, path: PathBuf },

    #[error("Malformed record on line {line}: {source}")]
    MalformedRecord {
        line: usize,
        #[source]
        source: RecordError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CoverageError {
    /// True for errors caused by input files that are absent or unreadable.
    #[must_use]
    pub fn is_missing_input(&self) -> bool {
        matches!(self, CoverageError::ManifestRead { .. } | CoverageError::LogFileMissing { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_record_display() {
        let err = CoverageError::MalformedRecord {
            line: 7,
            source: RecordError::InvalidHex { field: "address", value: "zz".to_string() },
        };
        assert_eq!(err.to_string(), "Malformed record on line 7: invalid hexadecimal address \"zz\"");
        assert!(!err.is_missing_input());
    }

    #[test]
    fn test_log_missing_names_log_and_path() {
        let err = CoverageError::LogFileMissing {
            what: "basic blocks log",
            path: PathBuf::from("/tmp/run.log.blocks"),
        };
        assert!(err.to_string().contains("basic blocks"));
        assert!(err.to_string().contains("/tmp/run.log.blocks"));
        assert!(err.is_missing_input());
    }
}
