//! Periculosidade (hazard premium) calculation.
//!
//! Employees in legally hazardous roles receive a fixed share of their base
//! salary on top of it.

use rust_decimal::Decimal;

use crate::models::{AuditStep, Employee};

use super::money::round_money;

/// The legal reference for the hazard premium.
pub const HAZARD_PAY_LEGAL_REF: &str = "CLT art. 193, §1º";

/// The result of calculating the hazard premium, including the audit step.
#[derive(Debug, Clone)]
pub struct HazardPayResult {
    /// The premium amount, zero when the role is not hazardous.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the periculosidade premium: `gross_salary × hazard_rate` for
/// hazardous roles, zero otherwise.
///
/// # Examples
///
/// ```
/// use folha_engine::calculation::calculate_dangerous_bonus;
/// use folha_engine::models::{Employee, UnhealthyLevel};
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_002".to_string(),
///     name: "Carlos Pereira".to_string(),
///     cpf: String::new(),
///     gross_salary: Decimal::new(200000, 2),
///     hours_per_day: Decimal::from(8),
///     days_per_week: 5,
///     work_days_in_month: 22,
///     dependents: 0,
///     is_dangerous: true,
///     unhealthy_level: UnhealthyLevel::None,
///     transport_voucher_value: Decimal::ZERO,
///     meal_voucher_daily: Decimal::ZERO,
///     benefit_plans: vec![],
///     overtime: None,
///     pension_alimony: Decimal::ZERO,
/// };
///
/// let result = calculate_dangerous_bonus(&employee, Decimal::new(30, 2), 2);
/// assert_eq!(result.amount, Decimal::new(60000, 2));
/// ```
pub fn calculate_dangerous_bonus(
    employee: &Employee,
    hazard_rate: Decimal,
    step_number: u32,
) -> HazardPayResult {
    if !employee.is_dangerous {
        let audit_step = AuditStep {
            step_number,
            rule_id: "hazard_pay".to_string(),
            rule_name: "Periculosidade".to_string(),
            legal_ref: HAZARD_PAY_LEGAL_REF.to_string(),
            input: serde_json::json!({
                "is_dangerous": false
            }),
            output: serde_json::json!({
                "eligible": false,
                "amount": "0.00"
            }),
            reasoning: "Role is not classified as hazardous - no periculosidade".to_string(),
        };

        return HazardPayResult {
            amount: round_money(Decimal::ZERO),
            audit_step,
        };
    }

    let amount = round_money(employee.gross_salary * hazard_rate);

    let audit_step = AuditStep {
        step_number,
        rule_id: "hazard_pay".to_string(),
        rule_name: "Periculosidade".to_string(),
        legal_ref: HAZARD_PAY_LEGAL_REF.to_string(),
        input: serde_json::json!({
            "is_dangerous": true,
            "gross_salary": employee.gross_salary.to_string(),
            "hazard_rate": hazard_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "eligible": true,
            "amount": amount.to_string()
        }),
        reasoning: format!(
            "R$ {} × {}% = R$ {}",
            employee.gross_salary,
            (hazard_rate * Decimal::ONE_HUNDRED).normalize(),
            amount
        ),
    };

    HazardPayResult { amount, audit_step }
}
