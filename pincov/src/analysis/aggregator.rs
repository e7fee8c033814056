//! Coverage record aggregation.
//!
//! # Data Flow
//!
//! ```text
//! log line
//!     │
//!     ├──► parsing::parse_line()        ← typed LogRecord (or skipped)
//!     │
//!     ├──► SymbolNormalizer.normalize() ← display name (or dropped)
//!     │
//!     └──► Aggregator.push()            ← retained entries + instruction total
//!
//! end of log ──► sort ──► write_report()
//! ```
//!
//! Dropped records contribute nothing: no row and no instructions. Module
//! counters in the registry are bumped by the normalizer for every token with
//! a known module prefix, retained or not.

use super::report::{write_report, ReportWriter};
use crate::domain::{CoverageError, LogRecord, RecordError, RecordKind, ResolvedEntry, SortOrder};
use crate::modules::ModuleRegistry;
use crate::parsing::{lossy_lines, parse_line};
use crate::symbolization::SymbolNormalizer;
use log::debug;
use std::io::{BufRead, Write};

/// Totals of a finished report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportSummary {
    /// Log lines read, including comments and skipped lines
    pub lines: usize,
    /// Rows written to the report
    pub entries: usize,
    /// Sum of `instructions * calls` over retained block records
    pub instructions: u64,
}

/// Collects normalized records until the log is exhausted.
#[derive(Debug, Default)]
pub struct Aggregator {
    entries: Vec<ResolvedEntry>,
    instructions: u64,
}

impl Aggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Retain `record` under its display name.
    ///
    /// # Errors
    /// Returns [`RecordError::InstructionOverflow`] if the instruction total
    /// no longer fits in a `u64`; the record is not retained.
    pub fn push(&mut self, record: &LogRecord, name: String) -> Result<(), RecordError> {
        self.instructions = record
            .executed_instructions()
            .and_then(|executed| self.instructions.checked_add(executed))
            .ok_or(RecordError::InstructionOverflow)?;
        self.entries.push(ResolvedEntry::from_record(record, name));
        Ok(())
    }

    #[must_use]
    pub fn entries(&self) -> &[ResolvedEntry] {
        &self.entries
    }

    /// Sort the retained entries and hand them out with the instruction total.
    #[must_use]
    pub fn finish(mut self, order: SortOrder) -> (Vec<ResolvedEntry>, u64) {
        order.sort(&mut self.entries);
        (self.entries, self.instructions)
    }
}

/// Run one log through the whole pipeline and write the report to `sink`.
///
/// `on_line` is called once per line read, before the line is decoded.
///
/// # Errors
/// - [`CoverageError::MalformedRecord`] for the first line with a malformed
///   numeric field or one that overflows the instruction total; nothing is
///   written to `sink` in that case
/// - [`CoverageError::Io`] if reading the log or writing the report fails
pub fn process<R, W, F>(
    reader: R,
    kind: RecordKind,
    order: SortOrder,
    normalizer: &SymbolNormalizer<'_>,
    registry: &mut ModuleRegistry,
    sink: &mut ReportWriter<W>,
    mut on_line: F,
) -> Result<ReportSummary, CoverageError>
where
    R: BufRead,
    W: Write,
    F: FnMut(usize),
{
    let mut aggregator = Aggregator::new();
    let mut lines = 0;

    for (idx, line) in lossy_lines(reader).enumerate() {
        let line = line?;
        let line_no = idx + 1;
        lines = line_no;
        on_line(line_no);

        let malformed = |source: RecordError| CoverageError::MalformedRecord { line: line_no, source };

        let Some(record) = parse_line(kind, &line).map_err(malformed)? else {
            continue;
        };

        if let Some(name) = normalizer.normalize(record.token(), registry).map_err(malformed)? {
            aggregator.push(&record, name).map_err(malformed)?;
        }
    }

    debug!("Read {lines} lines, retained {} {kind} records", aggregator.entries().len());

    let (entries, instructions) = aggregator.finish(order);
    write_report(sink, kind, &entries, instructions)?;
    sink.flush()?;

    Ok(ReportSummary { lines, entries: entries.len(), instructions })
}
