//! Export adapters. Ranked results to files.

pub mod csv_export;

pub use csv_export::{export_results, results_to_csv};
