//! Configuration loading for the reconciliation engine.
//!
//! This module loads the superannuation guarantee rate, the OTE payment type
//! label and the currency symbol from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use super_recon::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/super.yaml").unwrap();
//! println!("SG rate: {}", loader.config().super_guarantee_rate);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_CURRENCY_SYMBOL, DEFAULT_OTE_PAYMENT_TYPE, DEFAULT_SUPER_GUARANTEE_RATE, ReconConfig,
};
