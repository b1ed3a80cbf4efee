//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading reconciliation
//! settings from a YAML file.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{ReconError, ReconResult};

use super::types::ReconConfig;

/// Loads and provides access to reconciliation configuration.
///
/// # File Format
///
/// ```text
/// super_guarantee_rate: "0.095"
/// ote_payment_type: OTE
/// currency_symbol: "$"
/// ```
///
/// # Example
///
/// ```no_run
/// use super_recon::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/super.yaml")?;
/// assert_eq!(loader.config().ote_payment_type, "OTE");
/// # Ok::<(), super_recon::error::ReconError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: ReconConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing or unreadable
    /// - The file contains invalid YAML
    /// - The rate lies outside `[0, 1]` or the OTE label is empty
    pub fn load<P: AsRef<Path>>(path: P) -> ReconResult<Self> {
        let path = path.as_ref();
        let config = Self::load_yaml::<ReconConfig>(path)?;
        Self::validate(&config)?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> ReconResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| ReconError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| ReconError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate(config: &ReconConfig) -> ReconResult<()> {
        if config.super_guarantee_rate < Decimal::ZERO || config.super_guarantee_rate > Decimal::ONE
        {
            return Err(ReconError::InvalidConfig {
                field: "super_guarantee_rate".to_string(),
                message: format!(
                    "must be between 0 and 1, got {}",
                    config.super_guarantee_rate
                ),
            });
        }

        if config.ote_payment_type.is_empty() {
            return Err(ReconError::InvalidConfig {
                field: "ote_payment_type".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &ReconConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> ReconConfig {
        self.config
    }
}
