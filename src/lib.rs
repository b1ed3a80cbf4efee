//! Superannuation Guarantee Reconciliation
//!
//! This crate reconciles the superannuation an employer owes on each
//! employee's ordinary time earnings (OTE) against the distributions actually
//! paid into the employee's fund, quarter by quarter.
//!
//! The pipeline reads three row streams (fund distributions, payroll payments
//! and payment-code types), aggregates each into a keyed total, and joins them
//! into a [`models::ReconciliationReport`] that can be rendered as text or
//! JSON.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod models;
pub mod report;
pub mod telemetry;
