//! Payroll calculation result models.
//!
//! This module contains the [`PayrollCalculation`] type and its associated
//! structures that capture every output of a payslip calculation: the derived
//! base pay, earnings, employee-side deductions, the employer FGTS cost, the
//! totals and an audit trace.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Hours and hourly wage derived from the contractual schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasePay {
    /// Hours per week (`hours_per_day × days_per_week`).
    pub weekly_hours: Decimal,
    /// Hours per month (`weekly_hours × work_days_in_month / days_per_week`).
    pub monthly_hours: Decimal,
    /// Base salary divided by monthly hours, rounded to cents.
    pub hourly_wage: Decimal,
}

/// Earnings (proventos) and benefit values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Earnings {
    /// The contractual monthly salary.
    pub base_salary: Decimal,
    /// Periculosidade premium.
    pub dangerous_bonus: Decimal,
    /// Insalubridade premium.
    pub unhealthy_bonus: Decimal,
    /// Paid overtime.
    pub overtime_value: Decimal,
    /// Overtime hours credited to the time bank instead of being paid.
    pub banked_overtime_hours: Decimal,
    /// Transport voucher value provided (benefit, not part of gross).
    pub transport_voucher: Decimal,
    /// Meal voucher value provided (benefit, not part of gross).
    pub meal_voucher: Decimal,
    /// Base salary plus premiums and paid overtime.
    pub gross_total: Decimal,
}

/// The INSS contribution withheld from the employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InssDeduction {
    /// The amount the brackets were applied to.
    pub calculation_base: Decimal,
    /// The contribution withheld.
    pub discount: Decimal,
    /// `discount / gross_total`, zero when gross is zero.
    pub effective_rate: Decimal,
}

/// The IRRF withheld from the employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrrfDeduction {
    /// Total dependent deduction subtracted from the base.
    pub dependent_deductions: Decimal,
    /// `max(0, gross − INSS − dependents − alimony)`.
    pub calculation_base: Decimal,
    /// The rate of the bracket the base fell into.
    pub bracket_rate: Decimal,
    /// The tax withheld.
    pub discount: Decimal,
    /// `discount / gross_total`, zero when gross is zero.
    pub effective_rate: Decimal,
}

/// Every employee-side deduction (descontos).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    /// INSS contribution.
    pub inss: InssDeduction,
    /// Income tax withheld.
    pub irrf: IrrfDeduction,
    /// Transport voucher discount, capped at 6% of the base salary.
    pub transport_voucher_discount: Decimal,
    /// Health plan co-pay.
    pub health_plan_discount: Decimal,
    /// Dental plan co-pay.
    pub dental_plan_discount: Decimal,
    /// Gym co-pay.
    pub gym_discount: Decimal,
    /// Sum of all the above. FGTS is never part of it.
    pub total: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The legal reference for this rule.
    pub legal_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate conditions that don't prevent calculation
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The complete, immutable result of a payroll calculation.
///
/// The engine builds a fresh value per call and never mutates it afterwards.
/// It holds nothing that depends on the clock or on randomness, so the same
/// employee and month always produce an equal value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollCalculation {
    /// The ID of the employee the calculation is for.
    pub employee_id: String,
    /// The employee's name at calculation time.
    pub employee_name: String,
    /// Opaque reference month label (e.g., "2024-06").
    pub reference_month: String,
    /// Hours and hourly wage.
    pub base: BasePay,
    /// Earnings and benefit values.
    pub earnings: Earnings,
    /// Employee-side deductions.
    pub deductions: Deductions,
    /// Employer FGTS deposit; informational, never subtracted from net pay.
    pub fgts: Decimal,
    /// `gross_total − deductions.total`.
    pub net_salary: Decimal,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

impl PayrollCalculation {
    /// Returns the gross total.
    pub fn gross_total(&self) -> Decimal {
        self.earnings.gross_total
    }

    /// Returns true if any warning with the given code was recorded.
    pub fn has_warning(&self, code: &str) -> bool {
        self.audit_trace.warnings.iter().any(|w| w.code == code)
    }
}
