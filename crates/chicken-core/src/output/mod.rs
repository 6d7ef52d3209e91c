//! Output
//!
//! Terminal results collection and JSON writing.

pub mod results;

pub use results::{write_results, OutputError, ResultsLedger, DEFAULT_RESULTS_PATH};
