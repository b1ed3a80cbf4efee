//! Calculation logic for superannuation reconciliation.
//!
//! This module contains the quarter classification policies, the loaders
//! that fold each input stream into its keyed aggregate (payroll payments,
//! fund distributions and OTE payment codes), and the reconciliation step
//! that joins obligations against distributions.

mod distribution_aggregator;
mod payment_aggregator;
mod payment_codes;
mod quarter_classifier;
mod reconciliation;
mod row;

pub use distribution_aggregator::{
    DistributionRow, aggregate_distributions, parse_distribution_row,
};
pub use payment_aggregator::{PaymentRow, aggregate_payments, parse_payment_row};
pub use payment_codes::{
    PaymentTypeRow, classify_payment_codes, is_ote_type, parse_payment_type_row,
};
pub use quarter_classifier::{QuarterPolicy, distribution_quarter, payroll_quarter};
pub use reconciliation::{reconcile, reconcile_quarter, super_payable, total_ote};
pub use row::{HEADER_ROWS, InputStream, LoadOutcome, SkippedRow};
