//! Fund distribution aggregation.
//!
//! Sums distributions by employee and distribution quarter. The stream's
//! columns are `[amount, date, (unused), (unused), employee code]`.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::RowError;
use crate::models::{CellValue, Distributions, PersonQuarter, Row, cell_at};

use super::quarter_classifier::QuarterPolicy;
use super::row::{InputStream, LoadOutcome, load_rows};

/// Quarter-boundary policy applied to distribution dates.
pub const QUARTER_POLICY: QuarterPolicy = QuarterPolicy::Distribution;

/// Column holding the distributed amount.
pub const AMOUNT_COLUMN: usize = 0;
/// Column holding the distribution date.
pub const DATE_COLUMN: usize = 1;
/// Column holding the numeric employee code.
pub const EMPLOYEE_COLUMN: usize = 4;

/// One parsed distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionRow {
    /// The amount paid into the fund.
    pub amount: Decimal,
    /// The date of the distribution.
    pub date: NaiveDate,
    /// The employee and distribution quarter.
    pub key: PersonQuarter,
}

/// Parses a single distribution row, classifying its date under the
/// distribution policy.
pub fn parse_distribution_row(row: &[CellValue]) -> Result<DistributionRow, RowError> {
    let amount = cell_at(row, AMOUNT_COLUMN).as_amount(AMOUNT_COLUMN)?;
    let date = cell_at(row, DATE_COLUMN).as_date(DATE_COLUMN)?;
    let employee_code = cell_at(row, EMPLOYEE_COLUMN).as_employee_code(EMPLOYEE_COLUMN)?;

    Ok(DistributionRow {
        amount,
        date,
        key: PersonQuarter::new(employee_code, QUARTER_POLICY.classify(date)),
    })
}

/// Aggregates the distribution stream into running totals per person-quarter.
///
/// The first row is a header. Repeated keys are summed. Rows with a bad
/// amount, date or employee code are logged and skipped, as is a row whose
/// amount would overflow its person-quarter total.
///
/// # Example
///
/// ```
/// use super_recon::calculation::aggregate_distributions;
/// use super_recon::models::{CellValue, PersonQuarter, Quarter, YearQuarter};
/// use rust_decimal::Decimal;
///
/// let row = |amount: &str, date: &str| vec![
///     CellValue::Text(amount.to_string()),
///     CellValue::Text(date.to_string()),
///     CellValue::Empty,
///     CellValue::Empty,
///     CellValue::Number(123.0),
/// ];
/// let rows = vec![row("Amount", "Date"), row("100.00", "2023-04-20"), row("50.00", "2023-04-21")];
///
/// let outcome = aggregate_distributions(&rows);
/// let key = PersonQuarter::new("123", YearQuarter::new(Quarter::Q1, 2023));
/// assert_eq!(outcome.value.total(&key), Decimal::new(15000, 2));
/// ```
pub fn aggregate_distributions(rows: &[Row]) -> LoadOutcome<Distributions> {
    load_rows(
        InputStream::Distributions,
        rows,
        Distributions::new(),
        parse_distribution_row,
        |distributions, row| {
            distributions
                .add(row.key, row.amount)
                .map_err(|_| RowError::AmountOverflow {
                    column: AMOUNT_COLUMN,
                    value: row.amount.to_string(),
                })
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Quarter, YearQuarter};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn header() -> Row {
        vec![
            text("Amount"),
            text("Payment Date"),
            text("Fund"),
            text("Member"),
            text("Employee Code"),
        ]
    }

    fn distribution(amount: &str, date: &str, employee: f64) -> Row {
        vec![
            text(amount),
            text(date),
            text("Fund A"),
            text("M-1"),
            CellValue::Number(employee),
        ]
    }

    fn key(employee: &str, quarter: Quarter, year: i32) -> PersonQuarter {
        PersonQuarter::new(employee, YearQuarter::new(quarter, year))
    }

    // ==========================================================================
    // DA-001: repeated keys accumulate
    // ==========================================================================
    #[test]
    fn test_da_001_repeated_keys_sum() {
        let rows = vec![
            header(),
            distribution("100.00", "2023-04-20", 123.0),
            distribution("50.00", "2023-04-28", 123.0),
        ];

        let outcome = aggregate_distributions(&rows);

        assert_eq!(
            outcome.value.total(&key("123", Quarter::Q1, 2023)),
            dec("150.00")
        );
        assert_eq!(outcome.value.len(), 1);
    }

    // ==========================================================================
    // DA-002: early-January distributions belong to previous year's Q4
    // ==========================================================================
    #[test]
    fn test_da_002_january_distribution_rolls_back() {
        let rows = vec![
            header(),
            distribution("80.00", "2024-01-28", 123.0),
            distribution("20.00", "2023-11-15", 123.0),
            distribution("30.00", "2024-01-29", 123.0),
        ];

        let outcome = aggregate_distributions(&rows);

        assert_eq!(
            outcome.value.total(&key("123", Quarter::Q4, 2023)),
            dec("100.00")
        );
        assert_eq!(
            outcome.value.total(&key("123", Quarter::Q1, 2024)),
            dec("30.00")
        );
    }

    // ==========================================================================
    // DA-003: bad rows are skipped and later rows still load
    // ==========================================================================
    #[test]
    fn test_da_003_bad_rows_skipped() {
        let rows = vec![
            header(),
            distribution("abc", "2023-04-20", 123.0),
            distribution("10.00", "31/31/2023", 123.0),
            distribution("40.00", "2023-04-20", 123.0),
        ];

        let outcome = aggregate_distributions(&rows);

        assert_eq!(
            outcome.value.total(&key("123", Quarter::Q1, 2023)),
            dec("40.00")
        );
        assert_eq!(outcome.skipped.len(), 2);
        assert!(matches!(
            outcome.skipped[0].error,
            RowError::InvalidAmount {
                column: AMOUNT_COLUMN,
                ..
            }
        ));
        assert!(matches!(
            outcome.skipped[1].error,
            RowError::InvalidDate {
                column: DATE_COLUMN,
                ..
            }
        ));
    }

    // ==========================================================================
    // DA-004: an amount overflowing its running total skips only that row
    // ==========================================================================
    #[test]
    fn test_da_004_overflowing_amount_skipped() {
        let rows = vec![
            header(),
            distribution("50000000000000000000000000000", "2023-04-20", 123.0),
            distribution("50000000000000000000000000000", "2023-04-21", 123.0),
            distribution("10", "2023-04-22", 123.0),
            distribution("50000000000000000000000000000", "2023-04-23", 456.0),
        ];

        let outcome = aggregate_distributions(&rows);

        assert_eq!(
            outcome.value.total(&key("123", Quarter::Q1, 2023)),
            dec("50000000000000000000000000010")
        );
        assert_eq!(
            outcome.value.total(&key("456", Quarter::Q1, 2023)),
            dec("50000000000000000000000000000")
        );
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].row_number, 3);
        assert!(matches!(
            outcome.skipped[0].error,
            RowError::AmountOverflow {
                column: AMOUNT_COLUMN,
                ..
            }
        ));
    }

    #[test]
    fn test_employees_are_kept_apart() {
        let rows = vec![
            header(),
            distribution("10.00", "2023-08-01", 1.0),
            distribution("20.00", "2023-08-01", 2.0),
        ];

        let outcome = aggregate_distributions(&rows);

        assert_eq!(
            outcome.value.total(&key("1", Quarter::Q3, 2023)),
            dec("10.00")
        );
        assert_eq!(
            outcome.value.total(&key("2", Quarter::Q3, 2023)),
            dec("20.00")
        );
    }

    #[test]
    fn test_numeric_amount_cells_are_exact() {
        let mut row = distribution("", "2023-05-01", 9.0);
        row[AMOUNT_COLUMN] = CellValue::Number(95.1);

        let parsed = parse_distribution_row(&row).unwrap();
        assert_eq!(parsed.amount, dec("95.1"));
        assert_eq!(parsed.key, key("9", Quarter::Q2, 2023));
    }
}
