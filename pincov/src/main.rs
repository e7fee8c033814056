//! # pincov - Main Entry Point
//!
//! Validates the inputs, writes the report to the console or `--outfile`,
//! then prints the processed-modules table on the console.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use pincov::analysis::{write_module_summary, LineEnding, ReportWriter};
use pincov::cli::{Args, Spinner};
use pincov::config::InputPaths;
use pincov::domain::{CoverageError, RecordKind, SortOrder};
use pincov::pipeline::{run_report, RunOutcome};
use pincov::preflight::check_inputs;
use pincov::symbolization::{NoSymbols, ObjectSymbolResolver, SymbolResolver};
use std::fs::File;
use std::io::{self, BufWriter, Write};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_NOINPUT: i32 = 66;

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let code = exit_code_for(&e);
            eprintln!("error: {e:#}");
            code
        }
    });
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<CoverageError>() {
        Some(e) if e.is_missing_input() => EXIT_NOINPUT,
        _ => EXIT_ERROR,
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let config = args.report_config();
    let quiet = args.quiet;

    if !quiet {
        println!("pincov v{}", env!("CARGO_PKG_VERSION"));
        for filter in &config.module_filters {
            println!("Filtering by module name \"{filter}\"");
        }
        match config.sort_order {
            SortOrder::ByName => println!("[+] Ordering list by symbol name"),
            SortOrder::ByCalls => println!("[+] Ordering list by number of calls"),
        }
    }

    let paths = InputPaths::from_log_path(&args.log_file);
    check_inputs(&paths, config.kind)?;

    let resolver: Box<dyn SymbolResolver> =
        if config.skip_symbols { Box::new(NoSymbols) } else { Box::new(ObjectSymbolResolver::new()) };

    let mut spinner = Spinner::stdout(!quiet);
    if !quiet {
        match config.kind {
            RecordKind::Routines => println!("[+] Parsing routines list, please wait...\n"),
            RecordKind::Blocks => println!("[+] Parsing basic blocks list, please wait...\n"),
        }
    }

    let outcome = if let Some(ref outfile) = args.outfile {
        let file = File::create(outfile)
            .with_context(|| format!("Failed to create output file {}", outfile.display()))?;
        if !quiet {
            println!("[+] Output file: \"{}\"", outfile.display());
        }

        let mut sink = ReportWriter::new(BufWriter::new(file), LineEnding::CrLf);
        let outcome =
            run_report(&config, &paths, resolver.as_ref(), &mut sink, |n| spinner.tick(n))?;
        sink.into_inner().into_inner().context("Failed to write output file")?;
        outcome
    } else {
        let stdout = io::stdout();
        let mut sink = ReportWriter::new(stdout.lock(), LineEnding::Lf);
        run_report(&config, &paths, resolver.as_ref(), &mut sink, |n| spinner.tick(n))?
    };
    spinner.clear();

    let RunOutcome { summary, registry } = outcome;
    info!("{} entries, {} instructions", summary.entries, summary.instructions);

    let mut stdout = io::stdout().lock();
    write_module_summary(&mut stdout, config.kind, &registry)?;
    if !quiet {
        writeln!(stdout, "\n[+] DONE\n")?;
    }
    stdout.flush()?;

    Ok(())
}
