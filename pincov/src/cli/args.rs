//! CLI argument definitions

use crate::config::ReportConfig;
use crate::domain::{RecordKind, SortOrder};
use clap::{ArgGroup, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pincov",
    version,
    about = "Turn Pin code coverage logs into per-symbol call count reports",
    group(ArgGroup::new("dump").required(true).args(["dump_blocks", "dump_routines"])),
    after_help = "\
EXAMPLES:
    pincov Coverager.log --dump-routines
    pincov Coverager.log --dump-blocks --order-by-calls
    pincov Coverager.log --dump-routines --modules ieframe,iexplore --outfile routines.txt"
)]
pub struct Args {
    /// Log file written by the instrumentation tool; `<LOG_FILE>.modules` and
    /// `<LOG_FILE>.routines` / `<LOG_FILE>.blocks` must exist next to it
    #[arg(value_name = "LOG_FILE")]
    pub log_file: PathBuf,

    /// Write the report to FILE (CRLF line endings) instead of the console
    #[arg(long, value_name = "FILE")]
    pub outfile: Option<PathBuf>,

    /// Report basic block execution counts
    #[arg(long)]
    pub dump_blocks: bool,

    /// Report routine call counts
    #[arg(long)]
    pub dump_routines: bool,

    /// Sort by symbol name (default)
    #[arg(long, overrides_with = "order_by_calls")]
    pub order_by_names: bool,

    /// Sort by number of calls, highest first
    #[arg(long, overrides_with = "order_by_names")]
    pub order_by_calls: bool,

    /// Only report modules whose name contains one of NAME (case-insensitive);
    /// use `?` to keep anonymous symbols
    #[arg(long, value_name = "NAME", value_delimiter = ',')]
    pub modules: Vec<String>,

    /// Don't load module symbols; report raw module+offset tokens
    #[arg(long)]
    pub skip_symbols: bool,

    /// Suppress status messages and the progress spinner
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Build the pipeline configuration from the parsed flags.
    #[must_use]
    pub fn report_config(&self) -> ReportConfig {
        let kind = if self.dump_blocks { RecordKind::Blocks } else { RecordKind::Routines };
        let sort_order = if self.order_by_calls { SortOrder::ByCalls } else { SortOrder::ByName };

        ReportConfig {
            kind,
            sort_order,
            module_filters: self.modules.iter().map(|m| m.trim_start().to_lowercase()).collect(),
            skip_symbols: self.skip_symbols,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("pincov").chain(args.iter().copied()))
    }

    #[test]
    fn test_dump_flag_required() {
        let err = parse(&["run.log"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_dump_flags_are_exclusive() {
        let err = parse(&["run.log", "--dump-blocks", "--dump-routines"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["run.log", "--dump-routines"]).unwrap().report_config();

        assert_eq!(config.kind, RecordKind::Routines);
        assert_eq!(config.sort_order, SortOrder::ByName);
        assert!(config.module_filters.is_empty());
        assert!(!config.skip_symbols);
    }

    #[test]
    fn test_module_filters_are_split_trimmed_and_lowercased() {
        let args = parse(&[
            "run.log",
            "--dump-blocks",
            "--modules",
            "IEFrame, iexplore",
            "--modules",
            "?",
            "--skip-symbols",
        ])
        .unwrap();
        let config = args.report_config();

        assert_eq!(config.kind, RecordKind::Blocks);
        assert_eq!(config.module_filters, ["ieframe", "iexplore", "?"]);
        assert!(config.skip_symbols);
    }

    #[test]
    fn test_last_order_flag_wins() {
        let args = parse(&["run.log", "--dump-routines", "--order-by-names", "--order-by-calls"]);
        assert_eq!(args.unwrap().report_config().sort_order, SortOrder::ByCalls);

        let args = parse(&["run.log", "--dump-routines", "--order-by-calls", "--order-by-names"]);
        assert_eq!(args.unwrap().report_config().sort_order, SortOrder::ByName);
    }
}
