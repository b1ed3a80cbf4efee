//! Error types for the superannuation reconciliation engine.
//!
//! Two severities exist. [`ReconError`] covers fatal setup failures (missing
//! files, unreadable workbooks, bad configuration) that stop a run before a
//! report is produced. [`RowError`] covers a single malformed input row; those
//! are logged and the row is skipped while the rest of the stream is loaded.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The fatal error type for the reconciliation engine.
///
/// # Example
///
/// ```
/// use super_recon::error::ReconError;
///
/// let error = ReconError::InputNotFound {
///     path: "/missing/filings.xlsx".to_string(),
/// };
/// assert_eq!(error.to_string(), "Input file not found: /missing/filings.xlsx");
/// ```
#[derive(Debug, Error)]
pub enum ReconError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value was present but unusable.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// The input workbook does not exist.
    #[error("Input file not found: {path}")]
    InputNotFound {
        /// The path that was not found.
        path: String,
    },

    /// The input workbook could not be opened or a sheet could not be read.
    #[error("Failed to read workbook '{path}': {message}")]
    WorkbookError {
        /// The path to the workbook.
        path: String,
        /// A description of the read error.
        message: String,
    },

    /// The workbook has fewer worksheets than the input contract requires.
    #[error("Workbook has {found} worksheet(s), expected at least {expected}")]
    MissingSheet {
        /// Number of worksheets required.
        expected: usize,
        /// Number of worksheets present.
        found: usize,
    },

    /// The report could not be rendered.
    #[error("Failed to render report: {message}")]
    RenderError {
        /// A description of the rendering failure.
        message: String,
    },
}

/// A type alias for Results that return ReconError.
pub type ReconResult<T> = Result<T, ReconError>;

/// Why a single input row was rejected.
///
/// Columns are 0-based positions within the row; `value` is a rendering of
/// the offending cell.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowError {
    /// The row has no value in a required column.
    #[error("missing value in column {column}")]
    MissingCell {
        /// The empty or absent column.
        column: usize,
    },

    /// A date column could not be interpreted as a calendar date.
    #[error("invalid date in column {column}: '{value}'")]
    InvalidDate {
        /// The offending column.
        column: usize,
        /// The cell contents.
        value: String,
    },

    /// A monetary column could not be parsed as an exact decimal.
    #[error("invalid amount in column {column}: '{value}'")]
    InvalidAmount {
        /// The offending column.
        column: usize,
        /// The cell contents.
        value: String,
    },

    /// An amount parsed, but adding it to its bucket would exceed the
    /// range of an exact decimal.
    #[error("amount in column {column} overflows its running total: '{value}'")]
    AmountOverflow {
        /// The offending column.
        column: usize,
        /// The cell contents.
        value: String,
    },

    /// An employee code column did not hold a numeric code.
    #[error("invalid employee code in column {column}: '{value}'")]
    InvalidEmployeeCode {
        /// The offending column.
        column: usize,
        /// The cell contents.
        value: String,
    },

    /// A text column held something that cannot be read as text.
    #[error("invalid text in column {column}: '{value}'")]
    InvalidText {
        /// The offending column.
        column: usize,
        /// The cell contents.
        value: String,
    },
}
