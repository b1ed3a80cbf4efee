//! Machine-readable JSON report.

use crate::engine::ReconciliationRun;
use crate::error::{ReconError, ReconResult};

/// Serializes a run (report and skipped rows) as pretty-printed JSON.
///
/// Monetary values are emitted as decimal strings at full precision.
pub fn render_json(run: &ReconciliationRun) -> ReconResult<String> {
    serde_json::to_string_pretty(run).map_err(|e| ReconError::RenderError {
        message: e.to_string(),
    })
}
