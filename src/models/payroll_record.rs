//! Stored payroll records.
//!
//! A [`PayrollRecord`] wraps a [`PayrollCalculation`] with the identity and
//! bookkeeping fields that only make sense once a calculation is handed to a
//! caller or a repository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PayrollCalculation;

/// A payroll calculation together with its bookkeeping metadata.
///
/// # Example
///
/// ```no_run
/// use folha_engine::calculation::calculate_payroll;
/// use folha_engine::config::PayrollConfig;
/// use folha_engine::models::{Employee, PayrollRecord};
///
/// # fn employee() -> Employee { unimplemented!() }
/// let config = PayrollConfig::brazil_2024();
/// let calculation = calculate_payroll(&employee(), "2024-06", &config)?;
/// let record = PayrollRecord::new(calculation, Some("hr_admin".to_string()));
/// println!("{} -> {}", record.calculation_id, record.calculation.net_salary);
/// # Ok::<(), folha_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub created_at: DateTime<Utc>,
    /// Who requested the calculation, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The calculation itself.
    #[serde(flatten)]
    pub calculation: PayrollCalculation,
}

impl PayrollRecord {
    /// Wraps a calculation with a fresh id, the current time and the engine version.
    pub fn new(calculation: PayrollCalculation, created_by: Option<String>) -> Self {
        Self {
            calculation_id: Uuid::new_v4(),
            created_at: Utc::now(),
            created_by,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            calculation,
        }
    }

    /// Returns the employee id of the wrapped calculation.
    pub fn employee_id(&self) -> &str {
        &self.calculation.employee_id
    }

    /// Returns the reference month of the wrapped calculation.
    pub fn reference_month(&self) -> &str {
        &self.calculation.reference_month
    }
}
