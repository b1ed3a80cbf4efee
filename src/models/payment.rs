//! Aggregated payroll and distribution models.
//!
//! These are the keyed structures built during load and handed read-only to
//! the reconciliation step: payroll line-items bucketed by employee and
//! quarter, distributions summed by [`PersonQuarter`], and the set of
//! OTE-eligible payment codes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use super::YearQuarter;

/// An employee identifier in canonical string form.
pub type EmployeeCode = String;

/// Adding an amount would take a running total outside the range of
/// [`Decimal`]. The aggregate is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("amount overflows the running total")]
pub struct TotalOverflow;

/// One payroll line-item's contribution to a quarter bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodePayment {
    /// The payroll payment code (e.g. "SALARY").
    pub payment_code: String,
    /// The amount paid.
    pub amount: Decimal,
}

impl CodePayment {
    /// Creates a new code payment.
    pub fn new(payment_code: impl Into<String>, amount: Decimal) -> Self {
        Self {
            payment_code: payment_code.into(),
            amount,
        }
    }
}

/// The join key between obligations and distributions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersonQuarter {
    /// The employee.
    pub employee_code: EmployeeCode,
    /// The quarter bucket.
    pub year_quarter: YearQuarter,
}

impl PersonQuarter {
    /// Creates a new person-quarter key.
    pub fn new(employee_code: impl Into<EmployeeCode>, year_quarter: YearQuarter) -> Self {
        Self {
            employee_code: employee_code.into(),
            year_quarter,
        }
    }
}

/// Payroll line-items indexed by employee, then by quarter.
///
/// Employees are remembered in order of first appearance. Buckets are created
/// lazily and only ever appended to. Each bucket also tracks the sum of the
/// absolute values of its amounts; a payment that would overflow it is
/// rejected, so any subset of a bucket can be summed without overflow.
///
/// # Example
///
/// ```
/// use super_recon::models::{CodePayment, EmployeePayments, Quarter, YearQuarter};
/// use rust_decimal::Decimal;
///
/// let q1 = YearQuarter::new(Quarter::Q1, 2023);
/// let mut payments = EmployeePayments::new();
/// payments.push("123", q1, CodePayment::new("SALARY", Decimal::new(100000, 2)))?;
/// payments.push("123", q1, CodePayment::new("BONUS", Decimal::new(5000, 2)))?;
///
/// assert_eq!(payments.bucket("123", q1).unwrap().len(), 2);
/// # Ok::<(), super_recon::models::TotalOverflow>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeePayments {
    order: Vec<EmployeeCode>,
    by_employee: HashMap<EmployeeCode, HashMap<YearQuarter, PaymentBucket>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct PaymentBucket {
    payments: Vec<CodePayment>,
    magnitude: Decimal,
}

impl EmployeePayments {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a payment to the bucket for `(employee_code, year_quarter)`.
    ///
    /// Fails without modifying the index if the bucket's absolute total would
    /// overflow.
    pub fn push(
        &mut self,
        employee_code: impl Into<EmployeeCode>,
        year_quarter: YearQuarter,
        payment: CodePayment,
    ) -> Result<(), TotalOverflow> {
        let employee_code = employee_code.into();
        let current = self
            .by_employee
            .get(&employee_code)
            .and_then(|quarters| quarters.get(&year_quarter))
            .map_or(Decimal::ZERO, |bucket| bucket.magnitude);
        let magnitude = current
            .checked_add(payment.amount.abs())
            .ok_or(TotalOverflow)?;

        if !self.by_employee.contains_key(&employee_code) {
            self.order.push(employee_code.clone());
        }
        let bucket = self
            .by_employee
            .entry(employee_code)
            .or_default()
            .entry(year_quarter)
            .or_default();
        bucket.payments.push(payment);
        bucket.magnitude = magnitude;
        Ok(())
    }

    /// Returns the payments recorded for one employee and quarter.
    pub fn bucket(
        &self,
        employee_code: &str,
        year_quarter: YearQuarter,
    ) -> Option<&[CodePayment]> {
        self.by_employee
            .get(employee_code)
            .and_then(|quarters| quarters.get(&year_quarter))
            .map(|bucket| bucket.payments.as_slice())
    }

    /// Returns true if any payment was recorded for the person-quarter.
    pub fn contains(&self, key: &PersonQuarter) -> bool {
        self.bucket(&key.employee_code, key.year_quarter).is_some()
    }

    /// Iterates employees in order of first appearance, yielding each
    /// employee's quarter buckets sorted ascending by year then quarter.
    pub fn iter_sorted(
        &self,
    ) -> impl Iterator<Item = (&str, Vec<(YearQuarter, &[CodePayment])>)> + '_ {
        self.order.iter().map(|employee_code| {
            let mut quarters: Vec<(YearQuarter, &[CodePayment])> = self
                .by_employee
                .get(employee_code)
                .map(|quarters| {
                    quarters
                        .iter()
                        .map(|(yq, bucket)| (*yq, bucket.payments.as_slice()))
                        .collect()
                })
                .unwrap_or_default();
            quarters.sort_by_key(|(yq, _)| *yq);
            (employee_code.as_str(), quarters)
        })
    }

    /// Returns the number of distinct employees.
    pub fn employee_count(&self) -> usize {
        self.order.len()
    }

    /// Returns the total number of line-items across all buckets.
    pub fn payment_count(&self) -> usize {
        self.by_employee
            .values()
            .flat_map(HashMap::values)
            .map(|bucket| bucket.payments.len())
            .sum()
    }

    /// Returns true if no payments have been recorded.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Distribution totals keyed by person-quarter.
///
/// Repeated keys accumulate; a key that was never added reads as zero.
///
/// # Example
///
/// ```
/// use super_recon::models::{Distributions, PersonQuarter, Quarter, YearQuarter};
/// use rust_decimal::Decimal;
///
/// let key = PersonQuarter::new("123", YearQuarter::new(Quarter::Q1, 2023));
/// let mut distributions = Distributions::new();
/// distributions.add(key.clone(), Decimal::new(10000, 2))?;
/// distributions.add(key.clone(), Decimal::new(5000, 2))?;
///
/// assert_eq!(distributions.total(&key), Decimal::new(15000, 2));
/// # Ok::<(), super_recon::models::TotalOverflow>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Distributions {
    totals: HashMap<PersonQuarter, Decimal>,
}

impl Distributions {
    /// Creates an empty set of totals.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` to the running total for `key`, starting from zero.
    ///
    /// Fails without modifying the total if the sum would overflow.
    pub fn add(&mut self, key: PersonQuarter, amount: Decimal) -> Result<(), TotalOverflow> {
        let total = self.total(&key).checked_add(amount).ok_or(TotalOverflow)?;
        self.totals.insert(key, total);
        Ok(())
    }

    /// Returns the total distributed for `key`, or zero if none was recorded.
    pub fn total(&self, key: &PersonQuarter) -> Decimal {
        self.totals.get(key).copied().unwrap_or(Decimal::ZERO)
    }

    /// Iterates all recorded totals in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&PersonQuarter, &Decimal)> {
        self.totals.iter()
    }

    /// Returns the number of distinct person-quarters.
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Returns true if no distributions have been recorded.
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

/// Payment codes whose classification type is OTE.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OteCodeSet {
    codes: HashSet<String>,
}

impl OteCodeSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a code. Adding the same code twice has no further effect.
    pub fn insert(&mut self, code: impl Into<String>) {
        self.codes.insert(code.into());
    }

    /// Returns true if `code` is OTE-eligible.
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    /// Returns the number of eligible codes.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns true if no code is eligible.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for OteCodeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().map(Into::into).collect(),
        }
    }
}
