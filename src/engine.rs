//! The end-to-end reconciliation pipeline.
//!
//! Stages run strictly in order, each consuming its stream in full before the
//! next starts: distributions, payments, payment types, then reconciliation.
//! Aggregates are plain values passed from one stage to the next.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calculation::{
    SkippedRow, aggregate_distributions, aggregate_payments, classify_payment_codes, reconcile,
};
use crate::config::ReconConfig;
use crate::input::InputStreams;
use crate::models::ReconciliationReport;

/// The outcome of a reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationRun {
    /// The reconciliation report.
    pub report: ReconciliationReport,
    /// Every row skipped across all streams, in stream then row order.
    pub skipped_rows: Vec<SkippedRow>,
}

/// Runs the full reconciliation over the three input streams.
///
/// # Example
///
/// ```
/// use super_recon::config::ReconConfig;
/// use super_recon::engine::run_reconciliation;
/// use super_recon::input::InputStreams;
///
/// let run = run_reconciliation(&InputStreams::default(), &ReconConfig::default());
/// assert!(run.report.employees.is_empty());
/// assert!(run.skipped_rows.is_empty());
/// ```
pub fn run_reconciliation(input: &InputStreams, config: &ReconConfig) -> ReconciliationRun {
    let distributions = aggregate_distributions(&input.distributions);
    let payments = aggregate_payments(&input.payments);
    let ote_codes = classify_payment_codes(&input.payment_types, &config.ote_payment_type);

    info!(
        distribution_buckets = distributions.value.len(),
        employees = payments.value.employee_count(),
        ote_codes = ote_codes.value.len(),
        "Inputs aggregated"
    );

    if ote_codes.value.is_empty() {
        warn!(
            ote_payment_type = %config.ote_payment_type,
            "No payment code is classified as OTE; every obligation will be zero"
        );
    }

    let report = reconcile(
        &payments.value,
        &ote_codes.value,
        &distributions.value,
        config.super_guarantee_rate,
    );

    let skipped_rows: Vec<SkippedRow> = distributions
        .skipped
        .into_iter()
        .chain(payments.skipped)
        .chain(ote_codes.skipped)
        .collect();

    if !skipped_rows.is_empty() {
        warn!(skipped = skipped_rows.len(), "Some input rows were skipped");
    }

    ReconciliationRun {
        report,
        skipped_rows,
    }
}
