//! Command-line surface: argument parsing and console progress

pub mod args;
pub mod progress;

pub use args::Args;
pub use progress::Spinner;
