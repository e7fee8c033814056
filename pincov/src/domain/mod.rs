//! Domain model for pincov
//!
//! This module contains core domain types and errors that provide:
//! - Tagged record variants instead of loosely typed line fields
//! - An explicit sort strategy enum
//! - Structured error handling

pub mod errors;
pub mod types;

// Re-export common types for convenience
pub use types::{BlockRecord, LogRecord, RecordKind, ResolvedEntry, RoutineRecord, SortOrder};

pub use errors::{CoverageError, RecordError};
