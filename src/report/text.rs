//! Human-readable text report.

use std::io::{self, Write};

use crate::config::ReconConfig;
use crate::models::{EmployeeReconciliation, QuarterReconciliation, ReconciliationReport};

use super::currency::format_currency;

/// Width of the line of `=` printed after each employee block.
pub const SEPARATOR_WIDTH: usize = 69;

/// Writes the text report to `out`.
///
/// Each employee gets a header line, then five lines per quarter (quarter,
/// OTE total, super payable, distributions, discrepancy) followed by a blank
/// line, and finally a separator. Unmatched distributions, if any, follow the
/// employee blocks.
pub fn write_text<W: Write>(
    out: &mut W,
    report: &ReconciliationReport,
    config: &ReconConfig,
) -> io::Result<()> {
    let separator = "=".repeat(SEPARATOR_WIDTH);

    for employee in &report.employees {
        write_employee(out, employee, &config.currency_symbol)?;
        writeln!(out, "{}", separator)?;
    }

    if !report.unmatched_distributions.is_empty() {
        writeln!(out, "Unmatched distributions")?;
        for unmatched in &report.unmatched_distributions {
            writeln!(
                out,
                "Employee {} {}: {}",
                unmatched.employee_code,
                unmatched.year_quarter,
                format_currency(unmatched.amount, &config.currency_symbol)
            )?;
        }
        writeln!(out, "{}", separator)?;
    }

    Ok(())
}

/// Renders the text report to a string.
pub fn render_text(report: &ReconciliationReport, config: &ReconConfig) -> io::Result<String> {
    let mut buffer = Vec::new();
    write_text(&mut buffer, report, config)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn write_employee<W: Write>(
    out: &mut W,
    employee: &EmployeeReconciliation,
    symbol: &str,
) -> io::Result<()> {
    writeln!(out, "Employee: {}", employee.employee_code)?;
    for quarter in &employee.quarters {
        write_quarter(out, quarter, symbol)?;
    }
    Ok(())
}

fn write_quarter<W: Write>(
    out: &mut W,
    quarter: &QuarterReconciliation,
    symbol: &str,
) -> io::Result<()> {
    writeln!(out, "{}", quarter.year_quarter)?;
    writeln!(
        out,
        "Total OTE earnings: {}",
        format_currency(quarter.total_ote, symbol)
    )?;
    writeln!(
        out,
        "Total super payable: {}",
        format_currency(quarter.super_payable, symbol)
    )?;
    writeln!(
        out,
        "Total distributions: {}",
        format_currency(quarter.distributed, symbol)
    )?;
    writeln!(
        out,
        "Discrepancy: {}",
        format_currency(quarter.discrepancy, symbol)
    )?;
    writeln!(out)
}
