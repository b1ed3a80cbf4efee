//! Core data models for the reconciliation engine.
//!
//! This module contains the domain models shared by the loaders, the
//! reconciliation step and the report renderers.

mod cell;
mod payment;
mod quarter;
mod reconciliation;

pub use cell::{CellValue, Row, cell_at, excel_serial_to_datetime};
pub use payment::{
    CodePayment, Distributions, EmployeeCode, EmployeePayments, OteCodeSet, PersonQuarter,
    TotalOverflow,
};
pub use quarter::{Quarter, YearQuarter};
pub use reconciliation::{
    EmployeeReconciliation, QuarterReconciliation, ReconciliationReport, UnmatchedDistribution,
};
