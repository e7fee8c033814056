//! Text rendering of coverage reports.
//!
//! ```text
//! #
//! #   Calls count -- Block Size -- Function Name
//! #
//!              42 -- 0x0000001f -- ieframe.dll!CDoc::Load+0x2c
//!               7 -- 0x00000008 -- ieframe.dll+1a2b
//! #
//! # 322 total instructions executed in given basic blocks
//! #
//! ```

use crate::domain::{RecordKind, ResolvedEntry};
use crate::modules::ModuleRegistry;
use std::io::{self, Write};

/// Line terminator written after every report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\n`, used on the console
    #[default]
    Lf,
    /// `\r\n`, used for `--outfile` reports
    CrLf,
}

impl LineEnding {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Line-oriented report sink.
///
/// Each line is written through immediately; buffering is up to `W`.
pub struct ReportWriter<W: Write> {
    out: W,
    line_ending: LineEnding,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(out: W, line_ending: LineEnding) -> Self {
        Self { out, line_ending }
    }

    /// Write one line followed by the configured terminator.
    ///
    /// # Errors
    /// Returns any error from the underlying writer.
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.write_all(self.line_ending.as_str().as_bytes())
    }

    /// Flush the underlying writer.
    ///
    /// # Errors
    /// Returns any error from the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Write the three-line column header for `kind`.
///
/// # Errors
/// Returns any error from the sink.
pub fn write_header<W: Write>(sink: &mut ReportWriter<W>, kind: RecordKind) -> io::Result<()> {
    let columns = match kind {
        RecordKind::Routines => format!("# {:>13} -- Function Name", "Calls count"),
        RecordKind::Blocks => format!("# {:>13} -- Block Size -- Function Name", "Calls count"),
    };
    sink.line("#")?;
    sink.line(&columns)?;
    sink.line("#")
}

/// Format one report row.
#[must_use]
pub fn format_entry(entry: &ResolvedEntry) -> String {
    match entry.size {
        Some(size) => format!("{:>15} -- 0x{size:08x} -- {}", entry.calls, entry.name),
        None => format!("{:>15} -- {}", entry.calls, entry.name),
    }
}

/// Write the basic block footer with the executed instruction total.
///
/// # Errors
/// Returns any error from the sink.
pub fn write_instruction_total<W: Write>(
    sink: &mut ReportWriter<W>,
    instructions: u64,
) -> io::Result<()> {
    sink.line("#")?;
    sink.line(&format!("# {instructions} total instructions executed in given basic blocks"))?;
    sink.line("#")
}

/// Write the full report: header, one row per entry, and the block footer.
///
/// `instructions` is only rendered for [`RecordKind::Blocks`].
///
/// # Errors
/// Returns any error from the sink.
pub fn write_report<W: Write>(
    sink: &mut ReportWriter<W>,
    kind: RecordKind,
    entries: &[ResolvedEntry],
    instructions: u64,
) -> io::Result<()> {
    write_header(sink, kind)?;
    for entry in entries {
        sink.line(&format_entry(entry))?;
    }
    if kind == RecordKind::Blocks {
        write_instruction_total(sink, instructions)?;
    }
    Ok(())
}

/// Write the processed-modules table: every registry entry with its count.
///
/// # Errors
/// Returns any error from `out`.
pub fn write_module_summary<W: Write>(
    out: &mut W,
    kind: RecordKind,
    registry: &ModuleRegistry,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "[+] Processed modules list:")?;
    writeln!(out)?;
    writeln!(out, "#")?;
    writeln!(out, "# {:>13} -- Module Name", kind.summary_label())?;
    writeln!(out, "#")?;
    for module in registry.iter() {
        writeln!(out, "{:>15} -- {}", module.processed, module.name)?;
    }
    Ok(())
}
