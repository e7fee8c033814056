//! Core record and ordering types shared by the parsing, symbolization and
//! reporting stages.

use std::cmp::Reverse;
use std::fmt;

/// Which coverage log is being processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// `<log>.routines`: one line per instrumented function
    Routines,
    /// `<log>.blocks`: one line per executed basic block
    Blocks,
}

impl RecordKind {
    /// File extension of the log that holds records of this kind.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            RecordKind::Routines => "routines",
            RecordKind::Blocks => "blocks",
        }
    }

    /// How the log of this kind is named in diagnostics.
    #[must_use]
    pub fn log_description(self) -> &'static str {
        match self {
            RecordKind::Routines => "routines log",
            RecordKind::Blocks => "basic blocks log",
        }
    }

    /// Column label used in the processed-modules summary.
    #[must_use]
    pub fn summary_label(self) -> &'static str {
        match self {
            RecordKind::Routines => "Routines count",
            RecordKind::Blocks => "Basic blocks count",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Routines => f.write_str("routines"),
            RecordKind::Blocks => f.write_str("basic blocks"),
        }
    }
}

/// Report ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Case-insensitive ascending display name
    #[default]
    ByName,
    /// Descending call count
    ByCalls,
}

impl SortOrder {
    /// Sort entries in place. The sort is stable, so ties keep log order.
    pub fn sort(self, entries: &mut [ResolvedEntry]) {
        match self {
            SortOrder::ByName => entries.sort_by_cached_key(|e| e.name.to_lowercase()),
            SortOrder::ByCalls => entries.sort_by_key(|e| Reverse(e.calls)),
        }
    }
}

/// A routine line: `address:symbolToken:callCount`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineRecord {
    pub address: u64,
    pub token: String,
    pub calls: u64,
}

/// A basic block line: `address:size:instructionCount:symbolToken:callCount`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRecord {
    pub address: u64,
    pub size: u32,
    pub instructions: u64,
    pub token: String,
    pub calls: u64,
}

/// One decoded log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogRecord {
    Routine(RoutineRecord),
    Block(BlockRecord),
}

impl LogRecord {
    #[must_use]
    pub fn address(&self) -> u64 {
        match self {
            LogRecord::Routine(r) => r.address,
            LogRecord::Block(b) => b.address,
        }
    }

    #[must_use]
    pub fn token(&self) -> &str {
        match self {
            LogRecord::Routine(r) => &r.token,
            LogRecord::Block(b) => &b.token,
        }
    }

    #[must_use]
    pub fn calls(&self) -> u64 {
        match self {
            LogRecord::Routine(r) => r.calls,
            LogRecord::Block(b) => b.calls,
        }
    }

    /// Block size, `None` for routines.
    #[must_use]
    pub fn size(&self) -> Option<u32> {
        match self {
            LogRecord::Routine(_) => None,
            LogRecord::Block(b) => Some(b.size),
        }
    }

    /// Instructions executed by this record across all of its calls.
    ///
    /// Routines do not carry an instruction count and contribute zero.
    /// `None` if the product does not fit in a `u64`.
    #[must_use]
    pub fn executed_instructions(&self) -> Option<u64> {
        match self {
            LogRecord::Routine(_) => Some(0),
            LogRecord::Block(b) => b.instructions.checked_mul(b.calls),
        }
    }
}

/// A record that survived module filtering, with its display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub address: u64,
    pub name: String,
    pub calls: u64,
    /// Block size, present only for basic block records
    pub size: Option<u32>,
}

impl ResolvedEntry {
    #[must_use]
    pub fn from_record(record: &LogRecord, name: String) -> Self {
        Self { address: record.address(), name, calls: record.calls(), size: record.size() }
    }
}
