//! Base pay resolution.
//!
//! This module derives weekly hours, monthly hours and the hourly wage from
//! an employee's contractual schedule.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, BasePay, Employee};

use super::money::round_money;

/// The legal reference for the hourly wage derivation.
pub const BASE_PAY_LEGAL_REF: &str = "CLT art. 64";

/// The result of resolving base pay, including the audit step.
#[derive(Debug, Clone)]
pub struct BasePayResult {
    /// Hours and hourly wage (rounded to cents) as reported on the payslip.
    pub base_pay: BasePay,
    /// The unrounded hourly wage, used for overtime.
    pub exact_hourly_wage: Decimal,
    /// The audit step recording this derivation.
    pub audit_step: AuditStep,
}

/// Derives weekly hours, monthly hours and the hourly wage.
///
/// Monthly hours follow one convention only:
/// `weekly_hours × (work_days_in_month / days_per_week)`. The expression is
/// evaluated as `hours_per_day × work_days_in_month`, which is the same value
/// without an intermediate division.
///
/// # Errors
///
/// Returns [`EngineError::DegenerateSchedule`] when the schedule yields no
/// positive monthly hours, instead of dividing by zero.
///
/// # Examples
///
/// ```
/// use folha_engine::calculation::resolve_base_pay;
/// use folha_engine::models::{Employee, UnhealthyLevel};
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Maria Silva".to_string(),
///     cpf: String::new(),
///     gross_salary: Decimal::new(220000, 2),
///     hours_per_day: Decimal::from(8),
///     days_per_week: 5,
///     work_days_in_month: 22,
///     dependents: 0,
///     is_dangerous: false,
///     unhealthy_level: UnhealthyLevel::None,
///     transport_voucher_value: Decimal::ZERO,
///     meal_voucher_daily: Decimal::ZERO,
///     benefit_plans: vec![],
///     overtime: None,
///     pension_alimony: Decimal::ZERO,
/// };
///
/// let result = resolve_base_pay(&employee, 1).unwrap();
/// assert_eq!(result.base_pay.weekly_hours, Decimal::from(40));
/// assert_eq!(result.base_pay.monthly_hours, Decimal::from(176));
/// assert_eq!(result.base_pay.hourly_wage, Decimal::new(1250, 2));
/// ```
pub fn resolve_base_pay(employee: &Employee, step_number: u32) -> EngineResult<BasePayResult> {
    let days_per_week = Decimal::from(employee.days_per_week);
    let work_days = Decimal::from(employee.work_days_in_month);

    let weekly_hours = employee.hours_per_day * days_per_week;
    let monthly_hours = employee.hours_per_day * work_days;

    if monthly_hours <= Decimal::ZERO {
        return Err(EngineError::DegenerateSchedule {
            message: format!(
                "{}h/day × {} work days gives {} monthly hours",
                employee.hours_per_day, employee.work_days_in_month, monthly_hours
            ),
        });
    }

    let exact_hourly_wage = employee.gross_salary / monthly_hours;
    let hourly_wage = round_money(exact_hourly_wage);

    let audit_step = AuditStep {
        step_number,
        rule_id: "base_pay".to_string(),
        rule_name: "Base Pay Resolution".to_string(),
        legal_ref: BASE_PAY_LEGAL_REF.to_string(),
        input: serde_json::json!({
            "gross_salary": employee.gross_salary.to_string(),
            "hours_per_day": employee.hours_per_day.normalize().to_string(),
            "days_per_week": employee.days_per_week,
            "work_days_in_month": employee.work_days_in_month
        }),
        output: serde_json::json!({
            "weekly_hours": weekly_hours.normalize().to_string(),
            "monthly_hours": monthly_hours.normalize().to_string(),
            "hourly_wage": hourly_wage.to_string()
        }),
        reasoning: format!(
            "{}h × {} days = {}h/week; {}h × {} work days = {}h/month; R$ {} / {}h = R$ {}/h",
            employee.hours_per_day.normalize(),
            employee.days_per_week,
            weekly_hours.normalize(),
            employee.hours_per_day.normalize(),
            employee.work_days_in_month,
            monthly_hours.normalize(),
            employee.gross_salary,
            monthly_hours.normalize(),
            hourly_wage
        ),
    };

    Ok(BasePayResult {
        base_pay: BasePay {
            weekly_hours,
            monthly_hours,
            hourly_wage,
        },
        exact_hourly_wage,
        audit_step,
    })
}
