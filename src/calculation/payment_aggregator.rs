//! Payroll payment aggregation.
//!
//! Buckets itemized payroll payments by employee and payroll quarter. The
//! stream's columns are `[(unused), date, employee code, payment code, amount]`.

use chrono::NaiveDate;

use crate::error::RowError;
use crate::models::{
    CellValue, CodePayment, EmployeeCode, EmployeePayments, Row, YearQuarter, cell_at,
};

use super::quarter_classifier::QuarterPolicy;
use super::row::{InputStream, LoadOutcome, load_rows};

/// Quarter-boundary policy applied to payroll dates.
pub const QUARTER_POLICY: QuarterPolicy = QuarterPolicy::Payroll;

/// Column holding the payment date.
pub const DATE_COLUMN: usize = 1;
/// Column holding the numeric employee code.
pub const EMPLOYEE_COLUMN: usize = 2;
/// Column holding the payment code.
pub const PAYMENT_CODE_COLUMN: usize = 3;
/// Column holding the amount paid.
pub const AMOUNT_COLUMN: usize = 4;

/// One parsed payroll line-item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRow {
    /// The date the payment was made.
    pub date: NaiveDate,
    /// The payroll quarter of `date`.
    pub year_quarter: YearQuarter,
    /// The employee paid.
    pub employee_code: EmployeeCode,
    /// The payment code and amount.
    pub payment: CodePayment,
}

/// Parses a single payroll row, classifying its date under the payroll policy.
///
/// # Example
///
/// ```
/// use super_recon::calculation::parse_payment_row;
/// use super_recon::models::{CellValue, Quarter, YearQuarter};
/// use rust_decimal::Decimal;
///
/// let row = vec![
///     CellValue::Empty,
///     CellValue::Text("2023-02-15".to_string()),
///     CellValue::Number(123.0),
///     CellValue::Text("SALARY".to_string()),
///     CellValue::Text("1000.00".to_string()),
/// ];
/// let parsed = parse_payment_row(&row).unwrap();
/// assert_eq!(parsed.year_quarter, YearQuarter::new(Quarter::Q1, 2023));
/// assert_eq!(parsed.employee_code, "123");
/// assert_eq!(parsed.payment.amount, Decimal::new(100000, 2));
/// ```
pub fn parse_payment_row(row: &[CellValue]) -> Result<PaymentRow, RowError> {
    let date = cell_at(row, DATE_COLUMN).as_date(DATE_COLUMN)?;
    let employee_code = cell_at(row, EMPLOYEE_COLUMN).as_employee_code(EMPLOYEE_COLUMN)?;
    let payment_code = cell_at(row, PAYMENT_CODE_COLUMN).as_text(PAYMENT_CODE_COLUMN)?;
    let amount = cell_at(row, AMOUNT_COLUMN).as_amount(AMOUNT_COLUMN)?;

    Ok(PaymentRow {
        date,
        year_quarter: QUARTER_POLICY.classify(date),
        employee_code,
        payment: CodePayment::new(payment_code, amount),
    })
}

/// Aggregates the payroll stream into per-employee, per-quarter buckets.
///
/// The first row is a header. Rows with a bad date, employee code, payment
/// code or amount are logged and skipped; the remaining rows still load. A row
/// is also skipped if its amount would overflow its bucket's absolute total.
pub fn aggregate_payments(rows: &[Row]) -> LoadOutcome<EmployeePayments> {
    load_rows(
        InputStream::Payments,
        rows,
        EmployeePayments::new(),
        parse_payment_row,
        |payments, row| {
            let amount = row.payment.amount;
            payments
                .push(row.employee_code, row.year_quarter, row.payment)
                .map_err(|_| RowError::AmountOverflow {
                    column: AMOUNT_COLUMN,
                    value: amount.to_string(),
                })
        },
    )
}
