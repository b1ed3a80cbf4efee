//! Payment code classification.
//!
//! Builds the set of OTE-eligible payment codes from the classification
//! stream: rows of `[code, type]`.

use crate::error::RowError;
use crate::models::{CellValue, OteCodeSet, Row, cell_at};

use super::row::{InputStream, LoadOutcome, load_rows};

/// Column holding the payment code.
pub const CODE_COLUMN: usize = 0;
/// Column holding the classification type.
pub const TYPE_COLUMN: usize = 1;

/// One parsed classification row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentTypeRow {
    /// The payment code.
    pub code: String,
    /// The classification type, exactly as it appears in the input.
    pub payment_type: String,
}

/// Parses a single classification row.
pub fn parse_payment_type_row(row: &[CellValue]) -> Result<PaymentTypeRow, RowError> {
    Ok(PaymentTypeRow {
        code: cell_at(row, CODE_COLUMN).as_text(CODE_COLUMN)?,
        payment_type: cell_at(row, TYPE_COLUMN).as_text(TYPE_COLUMN)?,
    })
}

/// Returns true if `payment_type` matches `ote_type`, ignoring case only.
///
/// # Example
///
/// ```
/// use super_recon::calculation::is_ote_type;
///
/// assert!(is_ote_type("ote", "OTE"));
/// assert!(is_ote_type("Ote", "OTE"));
/// assert!(!is_ote_type("OTE ", "OTE"));
/// ```
pub fn is_ote_type(payment_type: &str, ote_type: &str) -> bool {
    payment_type.to_lowercase() == ote_type.to_lowercase()
}

/// Builds the OTE code set from the classification stream.
///
/// The first row is a header. Rows missing either field are logged and
/// skipped. A code listed more than once is included once.
pub fn classify_payment_codes(rows: &[Row], ote_type: &str) -> LoadOutcome<OteCodeSet> {
    load_rows(
        InputStream::PaymentTypes,
        rows,
        OteCodeSet::new(),
        parse_payment_type_row,
        |codes, row| {
            if is_ote_type(&row.payment_type, ote_type) {
                codes.insert(row.code);
            }
            Ok(())
        },
    )
}
