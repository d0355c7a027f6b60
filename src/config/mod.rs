//! Configuration loading and management for the payroll engine.
//!
//! This module provides the statutory rate tables (INSS, IRRF and the
//! flat-rate constants), the policy switches that are not fixed by law,
//! and a loader for the YAML files that carry them.
//!
//! # Example
//!
//! ```no_run
//! use folha_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/br2024").unwrap();
//! println!("Loaded tables: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    InssBracket, IrrfBracket, JurisdictionMetadata, PayrollConfig, PayrollPolicy, PremiumPolicy,
    RateTables, UnhealthyRates,
};
