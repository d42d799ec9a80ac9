//! Batch PAYE calculation over CSV files.
//!
//! [`loader`] turns CSV rows into calculation requests and [`export`] runs
//! them and writes the results back out as CSV.

pub mod export;
pub mod loader;

pub use export::{BatchResultRow, BatchWriteError, evaluate, total_tax, write_results};
pub use loader::{BatchLoadError, BatchRequest, load_from_file, load_from_reader, load_from_str};
