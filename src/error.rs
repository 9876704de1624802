//! Error types for examcost
//!
//! Two layers: `ExamcostError` (main error enum, with `ConfigError` and
//! `CsvFormatError` sub-enums) for library code, `anyhow::Result` at the CLI
//! boundary.
//!
//! ## Error Handling Philosophy
//!
//! Library code uses `crate::error::Result<T>` which returns `ExamcostError`.
//! CLI code uses `anyhow::Result<T>` for top-level error handling; the
//! conversion happens at the CLI boundary and preserves error chains.
//!
//! - Library code benefits from structured error types for programmatic
//!   handling (tests match on variants)
//! - CLI code benefits from `anyhow`'s context chains and user-friendly
//!   display
//!
//! ## When to Use Which Error
//!
//! - `ConfigError`: configuration parsing and validation issues, including
//!   an invalid instance catalog. Converted via `#[from]`.
//!
//! - `CsvFormatError`: structural CSV import failures (too few rows, a
//!   required column that cannot be resolved). These abort the import.
//!   A non-numeric student-count cell is NOT an error: it is soft
//!   invalidity, reported through `CsvImport::students == None` so the
//!   caller can decide whether to accept partial data.
//!
//! - `Validation`: user input rejected before estimation (zero student
//!   count, blank exam details).
//!
//! - `History`: history store failures beyond plain I/O.

use thiserror::Error;

/// Main error type for examcost
#[derive(Error, Debug)]
pub enum ExamcostError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("CSV format error: {0}")]
    CsvFormat(#[from] CsvFormatError),

    #[error("Validation error: {field} - {reason}")]
    Validation { field: String, reason: String },

    #[error("History store error: {0}")]
    History(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Failed to parse config: {0}")]
    ParseError(String),
}

/// Structural CSV import failures (hard format errors)
///
/// A file that trips one of these is abandoned outright; nothing is
/// extracted from it.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CsvFormatError {
    #[error("CSV must contain at least a header row and one data row (found {found} line(s))")]
    TooFewRows { found: usize },

    #[error("CSV is missing a required column: {column} (matched by substring against the header row)")]
    MissingColumn { column: &'static str },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ExamcostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_conversion() {
        let config_error = ConfigError::NotFound("/path/to/config".to_string());
        let err: ExamcostError = config_error.into();

        assert!(matches!(err, ExamcostError::Config(_)));
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_csv_format_error_conversion() {
        let format_error = CsvFormatError::TooFewRows { found: 1 };
        let err: ExamcostError = format_error.into();

        assert!(matches!(err, ExamcostError::CsvFormat(_)));
        assert!(err.to_string().contains("header row and one data row"));
    }

    #[test]
    fn test_io_error_conversion() {
        use std::io;

        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let err: ExamcostError = io_error.into();

        assert!(matches!(err, ExamcostError::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_validation_error_display() {
        let err = ExamcostError::Validation {
            field: "students".to_string(),
            reason: "must be at least 1".to_string(),
        };

        assert!(err.to_string().contains("Validation error"));
        assert!(err.to_string().contains("students"));
    }

    #[test]
    fn test_missing_column_names_the_column() {
        let err = CsvFormatError::MissingColumn {
            column: "university",
        };
        assert!(err.to_string().contains("university"));
    }
}
