//! Reconciliation result models.
//!
//! This module contains the [`ReconciliationReport`] type and its associated
//! structures. A report is computed once from the aggregated inputs and then
//! rendered; rendering never recomputes anything.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EmployeeCode, YearQuarter};

/// The reconciled position of one employee for one quarter.
///
/// # Example
///
/// ```
/// use super_recon::models::{Quarter, QuarterReconciliation, YearQuarter};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let line = QuarterReconciliation {
///     year_quarter: YearQuarter::new(Quarter::Q1, 2023),
///     total_ote: Decimal::from_str("1000.00").unwrap(),
///     super_payable: Decimal::from_str("95.00").unwrap(),
///     distributed: Decimal::from_str("90.00").unwrap(),
///     discrepancy: Decimal::from_str("-5.00").unwrap(),
/// };
/// assert!(line.is_underpaid());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterReconciliation {
    /// The quarter being reconciled.
    pub year_quarter: YearQuarter,
    /// Sum of OTE-eligible payments in the quarter.
    pub total_ote: Decimal,
    /// Superannuation owed on that OTE.
    pub super_payable: Decimal,
    /// Distributions actually received for the quarter.
    pub distributed: Decimal,
    /// `distributed - super_payable`; negative means under-payment.
    pub discrepancy: Decimal,
}

impl QuarterReconciliation {
    /// Returns true if less was distributed than was owed.
    pub fn is_underpaid(&self) -> bool {
        self.discrepancy < Decimal::ZERO
    }
}

/// All reconciled quarters for one employee, sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeReconciliation {
    /// The employee.
    pub employee_code: EmployeeCode,
    /// One entry per quarter with payroll activity, oldest first.
    pub quarters: Vec<QuarterReconciliation>,
}

/// A distribution bucket with no matching payroll bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmatchedDistribution {
    /// The employee the distribution was made for.
    pub employee_code: EmployeeCode,
    /// The distribution quarter.
    pub year_quarter: YearQuarter,
    /// The total distributed in that quarter.
    pub amount: Decimal,
}

/// The complete reconciliation of payroll obligations against distributions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// Employees in order of first appearance in the payroll stream.
    pub employees: Vec<EmployeeReconciliation>,
    /// Distributions that matched no payroll bucket, sorted by employee then quarter.
    pub unmatched_distributions: Vec<UnmatchedDistribution>,
}

impl ReconciliationReport {
    /// Finds the reconciliation for a given employee and quarter.
    pub fn find(
        &self,
        employee_code: &str,
        year_quarter: YearQuarter,
    ) -> Option<&QuarterReconciliation> {
        self.employees
            .iter()
            .find(|e| e.employee_code == employee_code)
            .and_then(|e| e.quarters.iter().find(|q| q.year_quarter == year_quarter))
    }

    /// Returns the number of quarters where the employee was under-paid.
    pub fn underpaid_count(&self) -> usize {
        self.employees
            .iter()
            .flat_map(|e| e.quarters.iter())
            .filter(|q| q.is_underpaid())
            .count()
    }
}
