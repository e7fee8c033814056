//! # pincov - Code Coverage Reports for Pin Logs
//!
//! pincov turns the raw execution logs of a binary-instrumentation coverage
//! tool into a readable report: one row per symbol with its call or
//! execution count, optionally restricted to a subset of modules and sorted
//! by name or by count.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐
//! │  <log>.modules   │   │ <log>.routines   │   │  module files    │
//! │  (manifest)      │   │ <log>.blocks     │   │  (symbol tables) │
//! └────────┬─────────┘   └────────┬─────────┘   └────────┬─────────┘
//!          │                      │                      │
//!          ▼                      ▼                      ▼
//! ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐
//! │  ModuleRegistry  │◀──│ SymbolNormalizer │──▶│  SymbolResolver  │
//! └──────────────────┘   └────────┬─────────┘   └──────────────────┘
//!                                 │
//!                                 ▼
//!                        ┌──────────────────┐
//!                        │ Aggregator +     │──▶ report text
//!                        │ Reporter         │
//!                        └──────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - [`modules`]: module manifest loading and per-module processed counters
//! - [`parsing`]: decoding of routine and basic block log lines
//! - [`symbolization`]: `module+offset` → `module!symbol+0x..` resolution
//!   - `resolver`: the lookup seam, with a resolver that never matches
//!   - `symbol_table`: symbol tables read from ELF, PE and Mach-O files
//!   - `normalizer`: module filtering and display name formatting
//! - [`analysis`]: retaining, sorting and rendering records
//! - [`pipeline`]: one complete run over the files of a log
//! - [`config`], [`cli`], [`preflight`]: run options and input validation
//! - [`domain`]: record types, sort order and errors
//!
//! ## Typical Usage
//!
//! ```bash
//! # Routine call counts, most called first
//! pincov Coverager.log --dump-routines --order-by-calls
//!
//! # Basic blocks of two modules only, written to a file
//! pincov Coverager.log --dump-blocks --modules ieframe,iexplore --outfile blocks.txt
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod domain;
pub mod modules;
pub mod parsing;
pub mod pipeline;
pub mod preflight;
pub mod symbolization;
