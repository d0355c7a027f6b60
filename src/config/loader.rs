//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! rate tables from YAML files.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};

use super::types::{JurisdictionMetadata, PayrollConfig, PayrollPolicy, RateTables};

/// Loads and provides access to the payroll configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory,
/// validates the rate tables and keeps the resulting [`PayrollConfig`].
///
/// # Directory Structure
///
/// ```text
/// config/br2024/
/// ├── jurisdiction.yaml   # Table set metadata
/// ├── tables.yaml         # INSS/IRRF brackets and flat-rate constants
/// └── policy.yaml         # Premium policy and overtime multiplier
/// ```
///
/// # Example
///
/// ```no_run
/// use folha_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/br2024").unwrap();
/// println!("Loaded tables: {}", loader.metadata().name);
/// println!("Minimum wage: {}", loader.config().tables().minimum_wage);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or misses a field (`ConfigParseError`)
    /// - The rate tables fail validation (`InvalidRateTable`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<JurisdictionMetadata>(&path.join("jurisdiction.yaml"))?;
        let tables = Self::load_yaml::<RateTables>(&path.join("tables.yaml"))?;
        let policy = Self::load_yaml::<PayrollPolicy>(&path.join("policy.yaml"))?;

        let config = PayrollConfig::new(metadata, tables, policy).inspect_err(|err| {
            warn!(path = %path.display(), error = %err, "Rejected payroll configuration");
        })?;

        info!(
            code = %config.metadata().code,
            year = config.tables().year,
            inss_brackets = config.tables().inss_brackets.len(),
            irrf_brackets = config.tables().irrf_brackets.len(),
            "Loaded payroll configuration"
        );

        Ok(Self { config })
    }

    /// Wraps an already-built configuration (e.g., the built-in 2024 tables).
    pub fn from_config(config: PayrollConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the jurisdiction metadata.
    pub fn metadata(&self) -> &JurisdictionMetadata {
        self.config.metadata()
    }

    /// Consumes the loader and returns the configuration.
    pub fn into_config(self) -> PayrollConfig {
        self.config
    }
}
