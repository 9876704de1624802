//! examcost library
//!
//! Core logic for the examcost CLI: the instance catalog, the resource
//! estimator, the CSV roster importer, and the analysis history store.

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod csv_import;
pub mod error;
pub mod estimate;
pub mod history;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use catalog::{Catalog, InstanceType};
pub use csv_import::{parse_csv, CsvImport};
pub use estimate::{estimate, ResourceEstimate};
pub use history::{AnalysisRecord, HistoryStore};
