//! Aggregation and rendering of coverage records
//!
//! This module holds the pipeline stage after symbol normalization: it
//! retains the surviving records, orders them, and renders the text report
//! and the processed-modules table.

pub mod aggregator;
pub mod report;

pub use aggregator::{process, Aggregator, ReportSummary};
pub use report::{write_module_summary, write_report, LineEnding, ReportWriter};
