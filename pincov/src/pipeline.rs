//! One complete report run over the files of an instrumentation run.

use crate::analysis::{process, ReportSummary, ReportWriter};
use crate::config::{InputPaths, ReportConfig};
use crate::domain::CoverageError;
use crate::modules::ModuleRegistry;
use crate::symbolization::{SymbolNormalizer, SymbolResolver};
use log::info;
use std::fs::File;
use std::io::{BufReader, Write};

/// Result of [`run_report`]: report totals plus the registry with its
/// per-module processed counts.
#[derive(Debug)]
pub struct RunOutcome {
    pub summary: ReportSummary,
    pub registry: ModuleRegistry,
}

/// Load the manifest and write the report for `config.kind`.
///
/// Inputs are expected to have passed [`crate::preflight::check_inputs`].
///
/// # Errors
/// - [`CoverageError::ManifestRead`] if the manifest cannot be read
/// - [`CoverageError::MalformedRecord`] if a log line has a malformed number
/// - [`CoverageError::Io`] for read or write failures
pub fn run_report<W, F>(
    config: &ReportConfig,
    paths: &InputPaths,
    resolver: &dyn SymbolResolver,
    sink: &mut ReportWriter<W>,
    on_line: F,
) -> Result<RunOutcome, CoverageError>
where
    W: Write,
    F: FnMut(usize),
{
    let mut registry = ModuleRegistry::load(&paths.modules)?;
    info!("{} modules in {}", registry.len(), paths.modules.display());

    let records_path = paths.records(config.kind);
    let reader = BufReader::new(File::open(records_path)?);
    let normalizer = SymbolNormalizer::new(&config.module_filters, config.skip_symbols, resolver);

    let summary = process(
        reader,
        config.kind,
        config.sort_order,
        &normalizer,
        &mut registry,
        sink,
        on_line,
    )?;
    info!(
        "{}: {} lines, {} entries reported",
        records_path.display(),
        summary.lines,
        summary.entries
    );

    Ok(RunOutcome { summary, registry })
}
