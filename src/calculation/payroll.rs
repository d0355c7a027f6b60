//! Payroll assembly.
//!
//! [`calculate_payroll`] is the single entry point of the engine: it validates
//! the employee, runs every stage in order and assembles an immutable
//! [`PayrollCalculation`] with the full audit trace.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditTrace, AuditWarning, Employee, PayrollCalculation};

use super::base_pay::resolve_base_pay;
use super::deductions::compute_deductions;
use super::earnings::accumulate_earnings;
use super::fgts::calculate_fgts;

/// Warning raised when deductions exceed gross pay.
pub const NEGATIVE_NET_WARNING: &str = "NEGATIVE_NET_SALARY";

/// Calculates the payslip of one employee for one reference month.
///
/// The result depends only on the arguments: the same employee, month and
/// configuration always produce an equal value. Nothing is shared between
/// calls, so calculations may run concurrently.
///
/// `net_salary` is `gross_total − deductions.total`. It may be negative when
/// deductions exceed gross pay; in that case a [`NEGATIVE_NET_WARNING`] is
/// recorded. FGTS is reported but never subtracted.
///
/// # Errors
///
/// - [`EngineError::InvalidEmployee`] or [`EngineError::DegenerateSchedule`]
///   when the employee violates the input contract.
/// - [`EngineError::CalculationError`] when the reference month is blank.
/// - [`EngineError::BracketNotFound`] when a rate table does not cover a base.
///
/// No partial result is ever returned.
///
/// # Examples
///
/// ```
/// use folha_engine::calculation::calculate_payroll;
/// use folha_engine::config::PayrollConfig;
/// use folha_engine::models::{Employee, UnhealthyLevel};
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Maria Silva".to_string(),
///     cpf: String::new(),
///     gross_salary: Decimal::new(141200, 2),
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
/// let payslip = calculate_payroll(&employee, "2024-06", &PayrollConfig::brazil_2024()).unwrap();
/// assert_eq!(payslip.deductions.inss.discount, Decimal::new(10590, 2));
/// assert_eq!(payslip.net_salary, Decimal::new(130610, 2));
/// assert_eq!(payslip.fgts, Decimal::new(11296, 2));
/// ```
pub fn calculate_payroll(
    employee: &Employee,
    reference_month: &str,
    config: &PayrollConfig,
) -> EngineResult<PayrollCalculation> {
    employee.validate()?;

    if reference_month.trim().is_empty() {
        return Err(EngineError::CalculationError {
            message: "reference_month must not be empty".to_string(),
        });
    }

    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();

    let base = resolve_base_pay(employee, 1)?;
    steps.push(base.audit_step.clone());

    let earnings = accumulate_earnings(employee, &base, config, next_step(&steps));
    steps.extend(earnings.audit_steps);
    warnings.extend(earnings.warnings);
    let earnings = earnings.earnings;

    debug!(
        employee_id = %employee.id,
        reference_month,
        gross_total = %earnings.gross_total,
        "Earnings accumulated"
    );

    let deductions = compute_deductions(employee, &earnings, config, next_step(&steps))?;
    steps.extend(deductions.audit_steps);
    warnings.extend(deductions.warnings);
    let deductions = deductions.deductions;

    let fgts = calculate_fgts(
        earnings.gross_total,
        config.tables().fgts_rate,
        next_step(&steps),
    );
    steps.push(fgts.audit_step);

    let net_salary = earnings.gross_total - deductions.total;

    steps.push(AuditStep {
        step_number: next_step(&steps),
        rule_id: "net_salary".to_string(),
        rule_name: "Net Salary".to_string(),
        legal_ref: "CLT art. 462".to_string(),
        input: serde_json::json!({
            "gross_total": earnings.gross_total.to_string(),
            "deductions_total": deductions.total.to_string()
        }),
        output: serde_json::json!({
            "net_salary": net_salary.to_string()
        }),
        reasoning: format!(
            "R$ {} - R$ {} = R$ {}",
            earnings.gross_total, deductions.total, net_salary
        ),
    });

    if net_salary < Decimal::ZERO {
        warnings.push(AuditWarning {
            code: NEGATIVE_NET_WARNING.to_string(),
            message: format!(
                "Deductions R$ {} exceed gross pay R$ {}",
                deductions.total, earnings.gross_total
            ),
            severity: "high".to_string(),
        });
    }

    debug!(
        employee_id = %employee.id,
        reference_month,
        net_salary = %net_salary,
        steps = steps.len(),
        warnings = warnings.len(),
        "Payroll calculated"
    );

    Ok(PayrollCalculation {
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        reference_month: reference_month.to_string(),
        base: base.base_pay,
        earnings,
        deductions,
        fgts: fgts.amount,
        net_salary,
        audit_trace: AuditTrace { steps, warnings },
    })
}

fn next_step(steps: &[AuditStep]) -> u32 {
    steps.last().map(|s| s.step_number + 1).unwrap_or(1)
}
