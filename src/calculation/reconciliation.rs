//! Reconciliation of superannuation obligations against distributions.
//!
//! For every employee with payroll activity, each quarter bucket's OTE total
//! is computed from the eligible payment codes, the superannuation owed is
//! derived from it, and the result is joined against the distributions
//! received for the same person-quarter.

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::models::{
    CodePayment, Distributions, EmployeePayments, EmployeeReconciliation, OteCodeSet,
    PersonQuarter, QuarterReconciliation, ReconciliationReport, UnmatchedDistribution, YearQuarter,
};

/// Sums the amounts of OTE-eligible payments in a bucket.
///
/// A payment that would overflow the sum is logged and left out of it.
/// Buckets built by [`EmployeePayments::push`] never overflow.
pub fn total_ote(payments: &[CodePayment], ote_codes: &OteCodeSet) -> Decimal {
    payments
        .iter()
        .filter(|p| ote_codes.contains(&p.payment_code))
        .fold(Decimal::ZERO, |total, p| {
            total.checked_add(p.amount).unwrap_or_else(|| {
                warn!(
                    payment_code = %p.payment_code,
                    amount = %p.amount,
                    "Payment overflows OTE total; leaving it out"
                );
                total
            })
        })
}

/// Computes the superannuation owed on `total_ote` at `rate`.
///
/// Exact decimal multiplication; no rounding is applied here. A product
/// beyond the range of [`Decimal`] saturates.
///
/// # Example
///
/// ```
/// use super_recon::calculation::super_payable;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rate = Decimal::from_str("0.095").unwrap();
/// let owed = super_payable(Decimal::from_str("1000.00").unwrap(), rate);
/// assert_eq!(owed, Decimal::from_str("95.00").unwrap());
/// ```
pub fn super_payable(total_ote: Decimal, rate: Decimal) -> Decimal {
    total_ote.saturating_mul(rate)
}

/// Reconciles one employee's quarter bucket.
pub fn reconcile_quarter(
    employee_code: &str,
    year_quarter: YearQuarter,
    payments: &[CodePayment],
    ote_codes: &OteCodeSet,
    distributions: &Distributions,
    rate: Decimal,
) -> QuarterReconciliation {
    let total_ote = total_ote(payments, ote_codes);
    let super_payable = super_payable(total_ote, rate);
    let distributed = distributions.total(&PersonQuarter::new(employee_code, year_quarter));
    let discrepancy = distributed.checked_sub(super_payable).unwrap_or_else(|| {
        warn!(
            employee = employee_code,
            quarter = %year_quarter,
            "Discrepancy overflows; saturating"
        );
        distributed.saturating_sub(super_payable)
    });

    QuarterReconciliation {
        year_quarter,
        total_ote,
        super_payable,
        distributed,
        discrepancy,
    }
}

/// Builds the full reconciliation report.
///
/// Employees appear in order of first appearance in the payroll stream and
/// each employee's quarters ascend by year then quarter. A person-quarter with
/// no distribution reconciles against zero. Distribution buckets with no
/// payroll bucket are collected into
/// [`ReconciliationReport::unmatched_distributions`].
pub fn reconcile(
    payments: &EmployeePayments,
    ote_codes: &OteCodeSet,
    distributions: &Distributions,
    rate: Decimal,
) -> ReconciliationReport {
    let employees: Vec<EmployeeReconciliation> = payments
        .iter_sorted()
        .map(|(employee_code, buckets)| {
            let quarters = buckets
                .into_iter()
                .map(|(year_quarter, bucket)| {
                    let line = reconcile_quarter(
                        employee_code,
                        year_quarter,
                        bucket,
                        ote_codes,
                        distributions,
                        rate,
                    );
                    debug!(
                        employee = employee_code,
                        quarter = %year_quarter,
                        total_ote = %line.total_ote,
                        discrepancy = %line.discrepancy,
                        "Reconciled quarter"
                    );
                    line
                })
                .collect();

            EmployeeReconciliation {
                employee_code: employee_code.to_string(),
                quarters,
            }
        })
        .collect();

    let mut unmatched_distributions: Vec<UnmatchedDistribution> = distributions
        .iter()
        .filter(|(key, _)| !payments.contains(key))
        .map(|(key, amount)| UnmatchedDistribution {
            employee_code: key.employee_code.clone(),
            year_quarter: key.year_quarter,
            amount: *amount,
        })
        .collect();
    unmatched_distributions.sort_by(|a, b| {
        a.employee_code
            .cmp(&b.employee_code)
            .then(a.year_quarter.cmp(&b.year_quarter))
    });

    let report = ReconciliationReport {
        employees,
        unmatched_distributions,
    };

    info!(
        employees = report.employees.len(),
        underpaid_quarters = report.underpaid_count(),
        unmatched_distributions = report.unmatched_distributions.len(),
        "Reconciliation complete"
    );

    report
}
