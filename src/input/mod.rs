//! Input adapters.
//!
//! The reconciliation core consumes three already-tokenized row streams.
//! This module produces them from a spreadsheet workbook.

mod workbook;

pub use workbook::{REQUIRED_SHEETS, read_workbook, to_cell_value};

use crate::models::Row;

/// The three input streams, each including its header row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputStreams {
    /// Rows of `[amount, date, (unused), (unused), employee code]`.
    pub distributions: Vec<Row>,
    /// Rows of `[(unused), date, employee code, payment code, amount]`.
    pub payments: Vec<Row>,
    /// Rows of `[code, type]`.
    pub payment_types: Vec<Row>,
}
