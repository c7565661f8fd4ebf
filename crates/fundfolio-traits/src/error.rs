//! Error types for fundfolio.
//!
//! Only structural problems are errors: unreadable files, malformed
//! configuration, missing columns, empty inputs. Arithmetic faults inside the
//! simulation (a zero or missing NAV) are not reported here; they surface as
//! `NaN` or infinite values in the results.

use thiserror::Error;

/// The main error type for fundfolio operations.
#[derive(Debug, Error)]
pub enum FundfolioError {
    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Error when a required column is missing from a table.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Error when data is insufficient for the requested operation.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Error when a date is out of range or cannot be parsed.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Error when a configuration value is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error when a named portfolio preset does not exist.
    #[error("Unknown portfolio preset: {0}")]
    UnknownPreset(String),

    /// Error reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Error parsing a TOML portfolio file.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Error from ndarray shape construction.
    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for FundfolioError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for FundfolioError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for fundfolio operations.
pub type Result<T> = std::result::Result<T, FundfolioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FundfolioError::MissingColumn("000368".to_string());
        assert_eq!(err.to_string(), "Missing required column: 000368");

        let err = FundfolioError::UnknownPreset("nope".to_string());
        assert_eq!(err.to_string(), "Unknown portfolio preset: nope");
    }

    #[test]
    fn test_error_from_str() {
        let err: FundfolioError = "boom".into();
        assert!(matches!(err, FundfolioError::Other(ref s) if s == "boom"));
    }

    #[test]
    fn test_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.csv");
        let err: FundfolioError = io.into();
        assert!(matches!(err, FundfolioError::Io(_)));
    }
}
