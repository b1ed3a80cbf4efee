//! Quarter and year-quarter models.
//!
//! A [`YearQuarter`] is the unit of reconciliation. Its meaning depends on the
//! policy that produced it; payroll and distribution quarters only line up
//! because both are keyed the same way after classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four quarters of a (payroll or distribution) year.
///
/// Ordering follows declaration order, so `Q1 < Q2 < Q3 < Q4`.
///
/// # Example
///
/// ```
/// use super_recon::models::Quarter;
///
/// assert!(Quarter::Q1 < Quarter::Q4);
/// assert_eq!(Quarter::Q3.to_string(), "Q3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quarter {
    /// First quarter.
    Q1,
    /// Second quarter.
    Q2,
    /// Third quarter.
    Q3,
    /// Fourth quarter.
    Q4,
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quarter::Q1 => write!(f, "Q1"),
            Quarter::Q2 => write!(f, "Q2"),
            Quarter::Q3 => write!(f, "Q3"),
            Quarter::Q4 => write!(f, "Q4"),
        }
    }
}

/// An immutable (quarter, year) bucket.
///
/// Field order makes the derived ordering sort by year first, then quarter.
///
/// # Example
///
/// ```
/// use super_recon::models::{Quarter, YearQuarter};
///
/// let earlier = YearQuarter::new(Quarter::Q4, 2022);
/// let later = YearQuarter::new(Quarter::Q1, 2023);
/// assert!(earlier < later);
/// assert_eq!(later.to_string(), "Q1/2023");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearQuarter {
    /// The year the quarter belongs to.
    pub year: i32,
    /// The quarter within that year.
    pub quarter: Quarter,
}

impl YearQuarter {
    /// Creates a new year-quarter.
    pub fn new(quarter: Quarter, year: i32) -> Self {
        Self { year, quarter }
    }
}

impl fmt::Display for YearQuarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.quarter, self.year)
    }
}
