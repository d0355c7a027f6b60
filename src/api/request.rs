//! Request types for the payroll API.

use serde::{Deserialize, Serialize};

use crate::models::Employee;

/// Request body for `POST /calculate`.
///
/// Calculates a payslip for an employee given inline, without storing it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The employee snapshot.
    pub employee: Employee,
    /// Reference month label (e.g., "2024-06").
    pub reference_month: String,
    /// Who requested the calculation.
    #[serde(default)]
    pub created_by: Option<String>,
}

/// Request body for `POST /employees/:id/payrolls`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRunRequest {
    /// Reference month label (e.g., "2024-06").
    pub reference_month: String,
    /// Who requested the calculation.
    #[serde(default)]
    pub created_by: Option<String>,
}

/// Query string of `GET /payrolls`.
///
/// Bounds are kept as strings and parsed by the handler so that a bad number
/// is reported as a validation error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetSalaryRangeQuery {
    /// Inclusive lower bound on net salary.
    pub min_net: Option<String>,
    /// Inclusive upper bound on net salary.
    pub max_net: Option<String>,
}
