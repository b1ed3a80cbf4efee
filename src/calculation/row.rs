//! Row-level load bookkeeping.
//!
//! Every input stream is loaded with the same discipline: blank rows above the
//! header are ignored, the header row is skipped, each remaining row is parsed
//! into a `Result` and folded into the aggregate. A row that fails to parse or
//! to fold is logged and recorded as a [`SkippedRow`]. One bad row never stops
//! the rest of the stream.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

use crate::error::RowError;
use crate::models::{CellValue, Row};

/// Number of header rows at the top of every stream, counted from its first
/// non-blank row.
pub const HEADER_ROWS: usize = 1;

/// Identifies one of the three input streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputStream {
    /// Fund distributions received.
    Distributions,
    /// Itemized payroll payments.
    Payments,
    /// Payment-code classification table.
    PaymentTypes,
}

impl fmt::Display for InputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputStream::Distributions => write!(f, "distributions"),
            InputStream::Payments => write!(f, "payments"),
            InputStream::PaymentTypes => write!(f, "payment_types"),
        }
    }
}

/// A row that was rejected during load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// The stream the row belongs to.
    pub stream: InputStream,
    /// 1-based spreadsheet row number (the header is row 1).
    pub row_number: usize,
    /// Why the row was rejected.
    pub error: RowError,
}

/// An aggregate together with the rows that could not contribute to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome<T> {
    /// The aggregate built from every valid row.
    pub value: T,
    /// Rows skipped because they could not be parsed.
    pub skipped: Vec<SkippedRow>,
}

/// Parses every data row of `rows` and folds the successes into `value`.
///
/// `rows[0]` is spreadsheet row 1. `apply` may reject a parsed row, which is
/// then skipped like a parse failure.
pub(crate) fn load_rows<T, P>(
    stream: InputStream,
    rows: &[Row],
    mut value: T,
    parse: impl Fn(&[CellValue]) -> Result<P, RowError>,
    mut apply: impl FnMut(&mut T, P) -> Result<(), RowError>,
) -> LoadOutcome<T> {
    let mut skipped = Vec::new();
    let mut loaded = 0usize;
    let first_data_row = rows
        .iter()
        .position(|row| !is_blank(row))
        .map_or(rows.len(), |header| header + HEADER_ROWS);

    for (index, row) in rows.iter().enumerate().skip(first_data_row) {
        let row_number = index + 1;
        match parse(row.as_slice()).and_then(|parsed| apply(&mut value, parsed)) {
            Ok(()) => loaded += 1,
            Err(error) => {
                warn!(stream = %stream, row = row_number, error = %error, "Skipping row");
                skipped.push(SkippedRow {
                    stream,
                    row_number,
                    error,
                });
            }
        }
    }

    info!(
        stream = %stream,
        loaded,
        skipped = skipped.len(),
        "Finished loading stream"
    );

    LoadOutcome { value, skipped }
}

fn is_blank(row: &[CellValue]) -> bool {
    row.iter().all(CellValue::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_integer(row: &[CellValue]) -> Result<i64, RowError> {
        match row.first() {
            Some(CellValue::Integer(n)) => Ok(*n),
            _ => Err(RowError::MissingCell { column: 0 }),
        }
    }

    fn add(sum: &mut i64, n: i64) -> Result<(), RowError> {
        *sum += n;
        Ok(())
    }

    fn header() -> Row {
        vec![CellValue::Text("Amount".to_string())]
    }

    #[test]
    fn test_header_row_is_skipped() {
        let rows = vec![header(), vec![CellValue::Integer(5)]];

        let outcome = load_rows(InputStream::Payments, &rows, 0i64, parse_integer, add);

        assert_eq!(outcome.value, 5);
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_bad_rows_are_recorded_and_loading_continues() {
        let rows = vec![
            header(),
            vec![CellValue::Integer(5)],
            vec![CellValue::Empty],
            vec![CellValue::Integer(7)],
        ];

        let outcome = load_rows(
            InputStream::Distributions,
            &rows,
            0i64,
            parse_integer,
            add,
        );

        assert_eq!(outcome.value, 12);
        assert_eq!(
            outcome.skipped,
            vec![SkippedRow {
                stream: InputStream::Distributions,
                row_number: 3,
                error: RowError::MissingCell { column: 0 },
            }]
        );
    }

    #[test]
    fn test_rejected_fold_is_skipped_like_a_parse_failure() {
        let rows = vec![
            header(),
            vec![CellValue::Integer(i64::MAX)],
            vec![CellValue::Integer(1)],
            vec![CellValue::Integer(-1)],
        ];

        let outcome = load_rows(
            InputStream::Distributions,
            &rows,
            0i64,
            parse_integer,
            |sum, n| {
                *sum = sum.checked_add(n).ok_or(RowError::AmountOverflow {
                    column: 0,
                    value: n.to_string(),
                })?;
                Ok(())
            },
        );

        assert_eq!(outcome.value, i64::MAX - 1);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].row_number, 3);
        assert!(matches!(
            outcome.skipped[0].error,
            RowError::AmountOverflow { column: 0, .. }
        ));
    }

    #[test]
    fn test_blank_rows_above_header_keep_row_numbers_absolute() {
        let rows = vec![
            vec![],
            vec![CellValue::Empty, CellValue::Text(String::new())],
            header(),
            vec![CellValue::Integer(5)],
            vec![CellValue::Text("five".to_string())],
        ];

        let outcome = load_rows(InputStream::Payments, &rows, 0i64, parse_integer, add);

        assert_eq!(outcome.value, 5);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].row_number, 5);
    }

    #[test]
    fn test_empty_stream_yields_initial_value() {
        let outcome = load_rows(InputStream::PaymentTypes, &[], 0i64, parse_integer, add);
        assert_eq!(outcome.value, 0);
        assert!(outcome.skipped.is_empty());

        let blank = vec![vec![CellValue::Empty]; 3];
        let outcome = load_rows(InputStream::PaymentTypes, &blank, 0i64, parse_integer, add);
        assert_eq!(outcome.value, 0);
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_stream_display_names() {
        assert_eq!(InputStream::PaymentTypes.to_string(), "payment_types");
        assert_eq!(InputStream::Distributions.to_string(), "distributions");
    }
}
