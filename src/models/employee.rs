//! Employee model and related types.
//!
//! This module defines the [`Employee`] snapshot the engine reads, together
//! with the closed enums for insalubridade levels, opt-in benefit plans and
//! overtime compensation.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Insalubridade exposure level.
///
/// Deserialized through [`FromStr`], so JSON accepts the same spellings as
/// `parse`. Unknown values are rejected rather than treated as `none`, so a
/// typo can never silently drop a premium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum UnhealthyLevel {
    /// No exposure.
    #[default]
    None,
    /// Low exposure (10% of the minimum wage).
    Low,
    /// Medium exposure (20% of the minimum wage).
    Medium,
    /// High exposure (40% of the minimum wage).
    High,
}

impl UnhealthyLevel {
    /// Returns the canonical lowercase name of the level.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnhealthyLevel::None => "none",
            UnhealthyLevel::Low => "low",
            UnhealthyLevel::Medium => "medium",
            UnhealthyLevel::High => "high",
        }
    }
}

impl fmt::Display for UnhealthyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for UnhealthyLevel {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for UnhealthyLevel {
    type Err = EngineError;

    /// Parses a level case-insensitively, accepting the Portuguese names too.
    ///
    /// ```
    /// use folha_engine::models::UnhealthyLevel;
    ///
    /// assert_eq!("HIGH".parse::<UnhealthyLevel>().unwrap(), UnhealthyLevel::High);
    /// assert_eq!("médio".parse::<UnhealthyLevel>().unwrap(), UnhealthyLevel::Medium);
    /// assert!("extreme".parse::<UnhealthyLevel>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "nenhum" => Ok(UnhealthyLevel::None),
            "low" | "baixo" => Ok(UnhealthyLevel::Low),
            "medium" | "medio" | "médio" => Ok(UnhealthyLevel::Medium),
            "high" | "alto" => Ok(UnhealthyLevel::High),
            other => Err(EngineError::invalid_employee(
                "unhealthy_level",
                format!(
                    "unknown variant `{}`, expected one of none, low, medium, high",
                    other
                ),
            )),
        }
    }
}

/// The kind of an opt-in benefit plan paid through payroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenefitPlanKind {
    /// Health insurance plan.
    Health,
    /// Dental plan.
    Dental,
    /// Gym membership.
    Gym,
}

/// A benefit plan the employee opted into, discounted from net pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitPlan {
    /// Which plan this is.
    pub kind: BenefitPlanKind,
    /// The monthly amount charged to the employee.
    pub monthly_value: Decimal,
}

/// How overtime hours are compensated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvertimeCompensation {
    /// Overtime is paid at the overtime multiplier.
    #[default]
    Paid,
    /// Overtime hours are credited to the time bank (banco de horas).
    TimeBank,
}

/// Overtime worked in the reference month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeEntry {
    /// Number of overtime hours worked.
    pub hours: Decimal,
    /// How the hours are compensated.
    #[serde(default)]
    pub compensation: OvertimeCompensation,
}

/// An employee snapshot as read from the employee registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Full name.
    pub name: String,
    /// CPF (Brazilian tax id).
    #[serde(default)]
    pub cpf: String,
    /// Monthly base salary.
    pub gross_salary: Decimal,
    /// Contractual hours per working day.
    pub hours_per_day: Decimal,
    /// Contractual working days per week (1 to 7).
    pub days_per_week: u32,
    /// Working days in the reference month.
    pub work_days_in_month: u32,
    /// Number of IRRF dependents.
    #[serde(default)]
    pub dependents: u32,
    /// Whether the role is legally hazardous (periculosidade).
    #[serde(default)]
    pub is_dangerous: bool,
    /// Insalubridade exposure level.
    #[serde(default)]
    pub unhealthy_level: UnhealthyLevel,
    /// Monthly cost of the transport voucher.
    #[serde(default)]
    pub transport_voucher_value: Decimal,
    /// Daily value of the meal voucher.
    #[serde(default)]
    pub meal_voucher_daily: Decimal,
    /// Benefit plans the employee opted into.
    #[serde(default)]
    pub benefit_plans: Vec<BenefitPlan>,
    /// Overtime worked in the month, if any.
    #[serde(default)]
    pub overtime: Option<OvertimeEntry>,
    /// Court-ordered alimony withheld monthly.
    #[serde(default)]
    pub pension_alimony: Decimal,
}

/// Largest accepted monetary input (one quadrillion).
pub const MAX_MONEY: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Largest accepted overtime in a month (31 days × 24 hours).
pub const MAX_OVERTIME_HOURS: u32 = 744;

/// Smallest accepted daily schedule (0.01 hours).
const MIN_HOURS_PER_DAY: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

impl Employee {
    /// Checks the snapshot against the input contract of the engine.
    ///
    /// Schedule problems that would make the hourly wage undefined are
    /// reported as [`EngineError::DegenerateSchedule`]; every other violation
    /// is an [`EngineError::InvalidEmployee`].
    pub fn validate(&self) -> EngineResult<()> {
        if self.id.trim().is_empty() {
            return Err(EngineError::invalid_employee("id", "must not be empty"));
        }

        if self.hours_per_day <= Decimal::ZERO {
            return Err(EngineError::DegenerateSchedule {
                message: format!("hours_per_day must be positive (got {})", self.hours_per_day),
            });
        }
        if self.hours_per_day < MIN_HOURS_PER_DAY {
            return Err(EngineError::DegenerateSchedule {
                message: format!(
                    "hours_per_day must be at least {} (got {})",
                    MIN_HOURS_PER_DAY, self.hours_per_day
                ),
            });
        }
        if self.days_per_week == 0 {
            return Err(EngineError::DegenerateSchedule {
                message: "days_per_week must be positive (got 0)".to_string(),
            });
        }
        if self.work_days_in_month == 0 {
            return Err(EngineError::DegenerateSchedule {
                message: "work_days_in_month must be positive (got 0)".to_string(),
            });
        }
        if self.days_per_week > 7 {
            return Err(EngineError::invalid_employee(
                "days_per_week",
                format!("must be between 1 and 7 (got {})", self.days_per_week),
            ));
        }
        if self.work_days_in_month > 31 {
            return Err(EngineError::invalid_employee(
                "work_days_in_month",
                format!("must be between 1 and 31 (got {})", self.work_days_in_month),
            ));
        }
        if self.hours_per_day > Decimal::from(24) {
            return Err(EngineError::invalid_employee(
                "hours_per_day",
                format!("must not exceed 24 (got {})", self.hours_per_day),
            ));
        }

        money("gross_salary", self.gross_salary)?;
        money("transport_voucher_value", self.transport_voucher_value)?;
        money("meal_voucher_daily", self.meal_voucher_daily)?;
        money("pension_alimony", self.pension_alimony)?;

        let mut seen = HashSet::new();
        for plan in &self.benefit_plans {
            money("benefit_plans.monthly_value", plan.monthly_value)?;
            if !seen.insert(plan.kind) {
                return Err(EngineError::invalid_employee(
                    "benefit_plans",
                    format!("plan {:?} is listed more than once", plan.kind),
                ));
            }
        }

        if let Some(overtime) = &self.overtime {
            non_negative("overtime.hours", overtime.hours)?;
            if overtime.hours > Decimal::from(MAX_OVERTIME_HOURS) {
                return Err(EngineError::invalid_employee(
                    "overtime.hours",
                    format!(
                        "must not exceed {} (got {})",
                        MAX_OVERTIME_HOURS, overtime.hours
                    ),
                ));
            }
        }

        Ok(())
    }

    /// Returns the monthly value of a benefit plan, or zero if not enrolled.
    pub fn benefit_plan_value(&self, kind: BenefitPlanKind) -> Decimal {
        self.benefit_plans
            .iter()
            .find(|plan| plan.kind == kind)
            .map(|plan| plan.monthly_value)
            .unwrap_or(Decimal::ZERO)
    }
}

fn non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::invalid_employee(
            field,
            format!("must not be negative (got {})", value),
        ));
    }
    Ok(())
}

/// Monetary inputs must be non-negative whole cents, at most [`MAX_MONEY`].
fn money(field: &str, value: Decimal) -> EngineResult<()> {
    non_negative(field, value)?;
    if value > MAX_MONEY {
        return Err(EngineError::invalid_employee(
            field,
            format!("must not exceed {} (got {})", MAX_MONEY, value),
        ));
    }
    if value.normalize().scale() > 2 {
        return Err(EngineError::invalid_employee(
            field,
            format!("must be expressed in whole cents (got {})", value),
        ));
    }
    Ok(())
}
