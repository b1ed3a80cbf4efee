//! Tokenized spreadsheet cells and the coercions applied to them.
//!
//! The reconciliation core never sees a spreadsheet. It consumes rows of
//! [`CellValue`]s and coerces individual cells into dates, exact decimal
//! amounts, employee codes and text, reporting a [`RowError`] when a cell
//! cannot be read the way its column requires.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RowError;

/// A single row of an input stream.
pub type Row = Vec<CellValue>;

/// Largest Excel serial date accepted (9999-12-31).
const MAX_EXCEL_SERIAL: f64 = 2_958_466.0;

/// Serial of the nonexistent 1900-02-29 that Excel's 1900 date system counts.
const PHANTOM_LEAP_DAY: u64 = 60;

const SECONDS_PER_DAY: f64 = 86_400.0;

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %I:%M:%S %p",
    "%d/%m/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];

/// A typed spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    /// No value.
    Empty,
    /// A text value.
    Text(String),
    /// A floating-point number.
    Number(f64),
    /// An integer.
    Integer(i64),
    /// A boolean.
    Bool(bool),
    /// A native date/time value.
    DateTime(NaiveDateTime),
    /// A spreadsheet error value such as `#DIV/0!`.
    Error(String),
}

impl CellValue {
    /// Returns true if the cell holds nothing (or only an empty string).
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Reads the cell as a calendar date.
    ///
    /// Native date cells are used directly, numbers are treated as Excel
    /// serial dates (1900 date system) and text is parsed in ISO or
    /// Australian day-first form.
    ///
    /// # Example
    ///
    /// ```
    /// use super_recon::models::CellValue;
    /// use chrono::NaiveDate;
    ///
    /// let cell = CellValue::Text("15/02/2023".to_string());
    /// assert_eq!(cell.as_date(1).unwrap(), NaiveDate::from_ymd_opt(2023, 2, 15).unwrap());
    ///
    /// let serial = CellValue::Number(44927.0);
    /// assert_eq!(serial.as_date(1).unwrap(), NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
    /// ```
    pub fn as_date(&self, column: usize) -> Result<NaiveDate, RowError> {
        let invalid = || RowError::InvalidDate {
            column,
            value: self.to_string(),
        };

        match self {
            CellValue::Empty => Err(RowError::MissingCell { column }),
            CellValue::DateTime(dt) => Ok(dt.date()),
            CellValue::Number(serial) => {
                excel_serial_to_datetime(*serial).map(|dt| dt.date()).ok_or_else(invalid)
            }
            CellValue::Integer(serial) => excel_serial_to_datetime(*serial as f64)
                .map(|dt| dt.date())
                .ok_or_else(invalid),
            CellValue::Text(s) if s.trim().is_empty() => Err(RowError::MissingCell { column }),
            CellValue::Text(s) => parse_date_text(s.trim()).ok_or_else(invalid),
            CellValue::Bool(_) | CellValue::Error(_) => Err(invalid()),
        }
    }

    /// Reads the cell as an exact decimal amount.
    ///
    /// The cell is rendered to text first and the text parsed as a decimal,
    /// so a numeric cell holding `1234.56` yields exactly `1234.56`.
    pub fn as_amount(&self, column: usize) -> Result<Decimal, RowError> {
        let invalid = || RowError::InvalidAmount {
            column,
            value: self.to_string(),
        };

        match self {
            CellValue::Empty => Err(RowError::MissingCell { column }),
            CellValue::Integer(n) => Ok(Decimal::from(*n)),
            CellValue::Number(n) if n.is_finite() => {
                parse_decimal(&n.to_string()).ok_or_else(invalid)
            }
            CellValue::Text(s) if s.trim().is_empty() => Err(RowError::MissingCell { column }),
            CellValue::Text(s) => parse_decimal(s).ok_or_else(invalid),
            _ => Err(invalid()),
        }
    }

    /// Reads the cell as an employee code in its canonical string form.
    ///
    /// Employee codes arrive as numbers. The canonical form is the shortest
    /// decimal string that round-trips the number, so `123.0` becomes `"123"`.
    /// Text holding a number is normalized the same way, keeping codes from
    /// different streams comparable.
    ///
    /// # Example
    ///
    /// ```
    /// use super_recon::models::CellValue;
    ///
    /// assert_eq!(CellValue::Number(123.0).as_employee_code(4).unwrap(), "123");
    /// assert_eq!(CellValue::Text("123.0".to_string()).as_employee_code(4).unwrap(), "123");
    /// assert_eq!(CellValue::Number(12.5).as_employee_code(4).unwrap(), "12.5");
    /// ```
    pub fn as_employee_code(&self, column: usize) -> Result<String, RowError> {
        let invalid = || RowError::InvalidEmployeeCode {
            column,
            value: self.to_string(),
        };

        match self {
            CellValue::Empty => Err(RowError::MissingCell { column }),
            CellValue::Integer(n) => Ok(n.to_string()),
            CellValue::Number(n) => render_number(*n).ok_or_else(invalid),
            CellValue::Text(s) if s.trim().is_empty() => Err(RowError::MissingCell { column }),
            CellValue::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(render_number)
                .ok_or_else(invalid),
            _ => Err(invalid()),
        }
    }

    /// Reads the cell as text. Numbers are rendered like employee codes.
    ///
    /// Text is returned exactly as stored; no trimming is applied.
    pub fn as_text(&self, column: usize) -> Result<String, RowError> {
        match self {
            CellValue::Empty => Err(RowError::MissingCell { column }),
            CellValue::Text(s) if s.is_empty() => Err(RowError::MissingCell { column }),
            CellValue::Text(s) => Ok(s.clone()),
            CellValue::Integer(n) => Ok(n.to_string()),
            CellValue::Number(n) => render_number(*n).ok_or_else(|| RowError::InvalidText {
                column,
                value: self.to_string(),
            }),
            _ => Err(RowError::InvalidText {
                column,
                value: self.to_string(),
            }),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Integer(n) => write!(f, "{}", n),
            CellValue::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::DateTime(dt) => write!(f, "{}", dt),
            CellValue::Error(e) => write!(f, "{}", e),
        }
    }
}

/// Returns the value in `column`, or [`CellValue::Empty`] if the row is short.
pub fn cell_at(row: &[CellValue], column: usize) -> &CellValue {
    const EMPTY: &CellValue = &CellValue::Empty;
    row.get(column).unwrap_or(EMPTY)
}

/// Converts an Excel serial date (1900 date system) to a datetime.
///
/// Excel treats 1900 as a leap year, so serials 1-59 count from 1899-12-31,
/// serial 60 (the phantom 1900-02-29) has no date, and serials from 61 on
/// count from 1899-12-30.
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 || serial >= MAX_EXCEL_SERIAL {
        return None;
    }

    let days = serial.trunc() as u64;
    let seconds = (serial.fract() * SECONDS_PER_DAY).round() as u32;

    let epoch = match days {
        PHANTOM_LEAP_DAY => return None,
        d if d < PHANTOM_LEAP_DAY => NaiveDate::from_ymd_opt(1899, 12, 31)?,
        _ => NaiveDate::from_ymd_opt(1899, 12, 30)?,
    };
    let date = epoch.checked_add_days(Days::new(days))?;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds.min(86_399), 0)?;
    Some(date.and_time(time))
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        })
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}

/// Renders a finite number as its shortest round-trip decimal string.
fn render_number(n: f64) -> Option<String> {
    n.is_finite().then(|| n.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_as_date_reads_native_datetime() {
        let dt = make_date("2023-03-31").and_hms_opt(14, 30, 0).unwrap();
        assert_eq!(
            CellValue::DateTime(dt).as_date(1).unwrap(),
            make_date("2023-03-31")
        );
    }

    #[test]
    fn test_as_date_parses_iso_and_australian_text() {
        let iso = CellValue::Text("2023-07-01".to_string());
        let au = CellValue::Text("01/07/2023".to_string());
        let au_time = CellValue::Text("1/07/2023 9:15:00 AM".to_string());

        assert_eq!(iso.as_date(1).unwrap(), make_date("2023-07-01"));
        assert_eq!(au.as_date(1).unwrap(), make_date("2023-07-01"));
        assert_eq!(au_time.as_date(1).unwrap(), make_date("2023-07-01"));
    }

    #[test]
    fn test_as_date_converts_excel_serial() {
        // 45016 is 2023-03-31 in the 1900 date system
        assert_eq!(
            CellValue::Number(45016.0).as_date(1).unwrap(),
            make_date("2023-03-31")
        );
        assert_eq!(
            CellValue::Number(45016.75).as_date(1).unwrap(),
            make_date("2023-03-31")
        );
    }

    #[test]
    fn test_serials_around_phantom_leap_day() {
        let date = |serial: f64| excel_serial_to_datetime(serial).map(|dt| dt.date());

        assert_eq!(date(1.0), Some(make_date("1900-01-01")));
        assert_eq!(date(59.0), Some(make_date("1900-02-28")));
        assert_eq!(date(60.0), None);
        assert_eq!(date(60.5), None);
        assert_eq!(date(61.0), Some(make_date("1900-03-01")));
        assert_eq!(date(44927.0), Some(make_date("2023-01-01")));
    }

    #[test]
    fn test_as_date_rejects_garbage() {
        let result = CellValue::Text("next tuesday".to_string()).as_date(1);
        assert_eq!(
            result,
            Err(RowError::InvalidDate {
                column: 1,
                value: "next tuesday".to_string()
            })
        );
    }

    #[test]
    fn test_as_date_empty_is_missing() {
        assert_eq!(
            CellValue::Empty.as_date(1),
            Err(RowError::MissingCell { column: 1 })
        );
    }

    #[test]
    fn test_as_amount_is_exact_for_numbers() {
        assert_eq!(CellValue::Number(0.1).as_amount(0).unwrap(), dec("0.1"));
        assert_eq!(
            CellValue::Number(1234.56).as_amount(0).unwrap(),
            dec("1234.56")
        );
        assert_eq!(CellValue::Integer(90).as_amount(0).unwrap(), dec("90"));
    }

    #[test]
    fn test_as_amount_parses_text_with_separators() {
        assert_eq!(
            CellValue::Text(" 1,250.75 ".to_string()).as_amount(0).unwrap(),
            dec("1250.75")
        );
        assert_eq!(
            CellValue::Text("-42.10".to_string()).as_amount(0).unwrap(),
            dec("-42.10")
        );
    }

    #[test]
    fn test_as_amount_rejects_non_numeric_text() {
        assert!(matches!(
            CellValue::Text("n/a".to_string()).as_amount(4),
            Err(RowError::InvalidAmount { column: 4, .. })
        ));
        assert!(matches!(
            CellValue::Bool(true).as_amount(4),
            Err(RowError::InvalidAmount { column: 4, .. })
        ));
    }

    #[test]
    fn test_employee_code_matches_across_representations() {
        let from_number = CellValue::Number(1001.0).as_employee_code(2).unwrap();
        let from_integer = CellValue::Integer(1001).as_employee_code(2).unwrap();
        let from_text = CellValue::Text("1001".to_string()).as_employee_code(2).unwrap();

        assert_eq!(from_number, "1001");
        assert_eq!(from_number, from_integer);
        assert_eq!(from_number, from_text);
    }

    #[test]
    fn test_employee_code_rejects_names() {
        assert!(matches!(
            CellValue::Text("J. Smith".to_string()).as_employee_code(2),
            Err(RowError::InvalidEmployeeCode { column: 2, .. })
        ));
    }

    #[test]
    fn test_as_text_does_not_trim() {
        assert_eq!(
            CellValue::Text("OTE ".to_string()).as_text(1).unwrap(),
            "OTE "
        );
    }

    #[test]
    fn test_as_text_renders_numbers() {
        assert_eq!(CellValue::Number(310.0).as_text(0).unwrap(), "310");
    }

    #[test]
    fn test_cell_at_past_end_is_empty() {
        let row = vec![CellValue::Integer(1)];
        assert_eq!(cell_at(&row, 0), &CellValue::Integer(1));
        assert_eq!(cell_at(&row, 5), &CellValue::Empty);
    }
}
