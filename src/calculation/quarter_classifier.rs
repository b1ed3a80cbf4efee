//! Date to quarter classification.
//!
//! Payroll line-items and fund distributions are bucketed under two different
//! quarter-boundary policies. Both are pure day-of-year mappings and they are
//! not interchangeable.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{Quarter, YearQuarter};

/// Selects which quarter-boundary policy applies to a date.
///
/// # Example
///
/// ```
/// use super_recon::calculation::QuarterPolicy;
/// use super_recon::models::{Quarter, YearQuarter};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2023, 1, 20).unwrap();
/// assert_eq!(QuarterPolicy::Payroll.classify(date), YearQuarter::new(Quarter::Q1, 2023));
/// assert_eq!(QuarterPolicy::Distribution.classify(date), YearQuarter::new(Quarter::Q4, 2022));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuarterPolicy {
    /// Calendar-aligned quarters used for payroll line-items.
    Payroll,
    /// Offset quarters used for fund distributions, where Q4 straddles the
    /// year boundary.
    Distribution,
}

impl QuarterPolicy {
    /// Classifies a date under this policy.
    pub fn classify(self, date: NaiveDate) -> YearQuarter {
        match self {
            QuarterPolicy::Payroll => payroll_quarter(date),
            QuarterPolicy::Distribution => distribution_quarter(date),
        }
    }
}

/// Maps a payroll date to its quarter.
///
/// | Day of year | Quarter |
/// |-------------|---------|
/// | 1-91        | Q1      |
/// | 92-182      | Q2      |
/// | 183-274     | Q3      |
/// | 275-366     | Q4      |
///
/// The year is always the calendar year of the date.
pub fn payroll_quarter(date: NaiveDate) -> YearQuarter {
    let quarter = match date.ordinal() {
        1..=91 => Quarter::Q1,
        92..=182 => Quarter::Q2,
        183..=274 => Quarter::Q3,
        _ => Quarter::Q4,
    };

    YearQuarter::new(quarter, date.year())
}

/// Maps a distribution date to its quarter.
///
/// | Day of year | Quarter              |
/// |-------------|----------------------|
/// | 1-28        | Q4 of previous year  |
/// | 29-119      | Q1                   |
/// | 120-210     | Q2                   |
/// | 211-302     | Q3                   |
/// | 303-366     | Q4                   |
pub fn distribution_quarter(date: NaiveDate) -> YearQuarter {
    let ordinal = date.ordinal();
    let quarter = match ordinal {
        29..=119 => Quarter::Q1,
        120..=210 => Quarter::Q2,
        211..=302 => Quarter::Q3,
        _ => Quarter::Q4,
    };
    let year = if ordinal <= 28 {
        date.year() - 1
    } else {
        date.year()
    };

    YearQuarter::new(quarter, year)
}
