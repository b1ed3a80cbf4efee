//! Configuration types for superannuation reconciliation.
//!
//! This module contains the strongly-typed configuration structure that is
//! deserialized from a YAML configuration file.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Statutory superannuation guarantee rate applied to OTE (9.5%).
pub const DEFAULT_SUPER_GUARANTEE_RATE: Decimal = Decimal::from_parts(95, 0, 0, false, 3);

/// Payment type label that marks a payment code as ordinary time earnings.
pub const DEFAULT_OTE_PAYMENT_TYPE: &str = "OTE";

/// Currency symbol used when rendering monetary values.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// Settings that drive a reconciliation run.
///
/// Every field is optional in YAML; anything left out falls back to the
/// statutory defaults.
///
/// # Example
///
/// ```
/// use super_recon::config::ReconConfig;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = ReconConfig::default();
/// assert_eq!(config.super_guarantee_rate, Decimal::from_str("0.095").unwrap());
/// assert_eq!(config.ote_payment_type, "OTE");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconConfig {
    /// Fraction of OTE owed to the employee's fund each quarter.
    pub super_guarantee_rate: Decimal,
    /// Classification type that marks a payment code as OTE-eligible.
    /// Matched case-insensitively, without trimming.
    pub ote_payment_type: String,
    /// Symbol prefixed to rendered currency amounts.
    pub currency_symbol: String,
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            super_guarantee_rate: DEFAULT_SUPER_GUARANTEE_RATE,
            ote_payment_type: DEFAULT_OTE_PAYMENT_TYPE.to_string(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}
