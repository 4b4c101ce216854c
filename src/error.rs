//! Error types for pokeviz operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, scaling, or drawing the chart.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed tabular input.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A column the chart depends on is absent from the header row.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A numeric column holds a value that does not parse as a number.
    #[error("Invalid number in row {row}, column {column:?}: {value:?}")]
    InvalidNumber {
        /// 1-based data row (header excluded).
        row: usize,
        /// Column header.
        column: String,
        /// Raw cell contents.
        value: String,
    },

    /// Empty data provided where non-empty is required.
    #[error("Empty data provided")]
    EmptyData,

    /// Invalid dimensions for a chart region.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Scale domain error (e.g., min equals max).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Configuration could not be parsed.
    #[error("Config parse error at line {line}: {message}")]
    ConfigParse {
        /// Line of the offending YAML (0 when unknown).
        line: usize,
        /// Parser message.
        message: String,
    },

    /// The host surface rejected an operation (missing element, DOM failure).
    #[error("Surface error: {0}")]
    Surface(String),

    /// The dataset resource could not be fetched.
    #[error("Fetch error: {0}")]
    Fetch(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidDimensions {
            width: 0,
            height: 100,
        };
        assert!(err.to_string().contains("Invalid dimensions"));
    }

    #[test]
    fn test_invalid_number_names_row_and_column() {
        let err = Error::InvalidNumber {
            row: 7,
            column: "Sp. Def".to_string(),
            value: "n/a".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains('7'));
        assert!(msg.contains("Sp. Def"));
        assert!(msg.contains("n/a"));
    }

    #[test]
    fn test_io_error_converts() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "pokemon.csv");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
