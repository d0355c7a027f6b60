//! Earnings accumulation.
//!
//! Combines the base salary with the risk premiums and paid overtime into the
//! gross total, applying the configured premium policy, and records the
//! voucher benefits alongside.

use rust_decimal::Decimal;

use crate::config::{PayrollConfig, PremiumPolicy};
use crate::models::{AuditStep, AuditWarning, Earnings, Employee};

use super::base_pay::BasePayResult;
use super::benefits::calculate_benefits;
use super::hazard_pay::calculate_dangerous_bonus;
use super::money::round_money;
use super::overtime::calculate_overtime;
use super::unhealthy_pay::calculate_unhealthy_bonus;

/// Warning raised when both risk premiums are paid together.
pub const CUMULATIVE_PREMIUMS_WARNING: &str = "CUMULATIVE_RISK_PREMIUMS";

/// Warning raised when the greater-of policy drops one of the premiums.
pub const PREMIUM_DROPPED_WARNING: &str = "RISK_PREMIUM_DROPPED";

/// Warning raised when overtime is credited to the time bank.
pub const TIME_BANK_WARNING: &str = "OVERTIME_BANKED";

/// The result of accumulating earnings.
#[derive(Debug, Clone)]
pub struct EarningsResult {
    /// The earnings block of the payslip.
    pub earnings: Earnings,
    /// One audit step per rule applied, in order.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings raised while accumulating.
    pub warnings: Vec<AuditWarning>,
}

/// Accumulates earnings for the month.
///
/// Audit steps are numbered from `first_step` upwards.
pub fn accumulate_earnings(
    employee: &Employee,
    base: &BasePayResult,
    config: &PayrollConfig,
    first_step: u32,
) -> EarningsResult {
    let tables = config.tables();
    let policy = config.policy();

    let mut step = first_step;
    let mut audit_steps = Vec::new();
    let mut warnings = Vec::new();

    let hazard = calculate_dangerous_bonus(employee, tables.hazard_rate, step);
    audit_steps.push(hazard.audit_step);
    step += 1;

    let unhealthy = calculate_unhealthy_bonus(
        employee.unhealthy_level,
        tables.minimum_wage,
        &tables.unhealthy_rates,
        step,
    );
    audit_steps.push(unhealthy.audit_step);
    step += 1;

    let mut dangerous_bonus = hazard.amount;
    let mut unhealthy_bonus = unhealthy.amount;

    if dangerous_bonus > Decimal::ZERO && unhealthy_bonus > Decimal::ZERO {
        match policy.premium_policy {
            PremiumPolicy::Additive => {
                warnings.push(AuditWarning {
                    code: CUMULATIVE_PREMIUMS_WARNING.to_string(),
                    message: format!(
                        "Periculosidade R$ {} and insalubridade R$ {} are both paid",
                        dangerous_bonus, unhealthy_bonus
                    ),
                    severity: "low".to_string(),
                });
            }
            PremiumPolicy::GreaterOf => {
                // Hazard wins a tie.
                let keep_hazard = dangerous_bonus >= unhealthy_bonus;
                let (kept, dropped) = if keep_hazard {
                    ("periculosidade", "insalubridade")
                } else {
                    ("insalubridade", "periculosidade")
                };

                audit_steps.push(AuditStep {
                    step_number: step,
                    rule_id: "premium_policy".to_string(),
                    rule_name: "Risk Premium Policy".to_string(),
                    legal_ref: "CLT art. 193, §2º".to_string(),
                    input: serde_json::json!({
                        "policy": "greater_of",
                        "dangerous_bonus": dangerous_bonus.to_string(),
                        "unhealthy_bonus": unhealthy_bonus.to_string()
                    }),
                    output: serde_json::json!({
                        "kept": kept,
                        "dropped": dropped
                    }),
                    reasoning: format!(
                        "Both premiums apply; greater-of policy keeps {} and drops {}",
                        kept, dropped
                    ),
                });
                step += 1;

                warnings.push(AuditWarning {
                    code: PREMIUM_DROPPED_WARNING.to_string(),
                    message: format!("{} dropped in favour of {}", dropped, kept),
                    severity: "medium".to_string(),
                });

                if keep_hazard {
                    unhealthy_bonus = round_money(Decimal::ZERO);
                } else {
                    dangerous_bonus = round_money(Decimal::ZERO);
                }
            }
        }
    }

    let overtime = calculate_overtime(
        employee.overtime.as_ref(),
        base.exact_hourly_wage,
        policy.overtime_multiplier,
        step,
    );
    audit_steps.push(overtime.audit_step);
    step += 1;

    if overtime.banked_hours > Decimal::ZERO {
        warnings.push(AuditWarning {
            code: TIME_BANK_WARNING.to_string(),
            message: format!(
                "{}h of overtime credited to the time bank",
                overtime.banked_hours.normalize()
            ),
            severity: "low".to_string(),
        });
    }

    let benefits = calculate_benefits(employee, step);
    audit_steps.push(benefits.audit_step);
    step += 1;

    let base_salary = round_money(employee.gross_salary);
    let gross_total = base_salary + dangerous_bonus + unhealthy_bonus + overtime.value;

    audit_steps.push(AuditStep {
        step_number: step,
        rule_id: "gross_total".to_string(),
        rule_name: "Gross Total".to_string(),
        legal_ref: "CLT art. 457".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.to_string(),
            "dangerous_bonus": dangerous_bonus.to_string(),
            "unhealthy_bonus": unhealthy_bonus.to_string(),
            "overtime_value": overtime.value.to_string()
        }),
        output: serde_json::json!({
            "gross_total": gross_total.to_string()
        }),
        reasoning: format!(
            "R$ {} + R$ {} + R$ {} + R$ {} = R$ {}",
            base_salary, dangerous_bonus, unhealthy_bonus, overtime.value, gross_total
        ),
    });

    EarningsResult {
        earnings: Earnings {
            base_salary,
            dangerous_bonus,
            unhealthy_bonus,
            overtime_value: overtime.value,
            banked_overtime_hours: overtime.banked_hours,
            transport_voucher: benefits.transport_voucher,
            meal_voucher: benefits.meal_voucher,
            gross_total,
        },
        audit_steps,
        warnings,
    }
}
