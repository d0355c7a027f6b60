//! Transport and meal voucher values.
//!
//! Vouchers are benefits provided by the employer. They are reported on the
//! payslip but are not part of gross pay.

use rust_decimal::Decimal;

use crate::models::{AuditStep, Employee};

use super::money::round_money;

/// The legal reference for the transport voucher.
pub const TRANSPORT_VOUCHER_LEGAL_REF: &str = "Lei 7.418/1985";

/// The legal reference for the meal voucher.
pub const MEAL_VOUCHER_LEGAL_REF: &str = "Lei 6.321/1976";

/// The voucher values provided to the employee for the month.
#[derive(Debug, Clone)]
pub struct BenefitsResult {
    /// Monthly transport voucher value.
    pub transport_voucher: Decimal,
    /// Monthly meal voucher value (`daily × work_days_in_month`).
    pub meal_voucher: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the transport and meal voucher values for the month.
pub fn calculate_benefits(employee: &Employee, step_number: u32) -> BenefitsResult {
    let transport_voucher = round_money(employee.transport_voucher_value);
    let meal_voucher =
        round_money(employee.meal_voucher_daily * Decimal::from(employee.work_days_in_month));

    let audit_step = AuditStep {
        step_number,
        rule_id: "vouchers".to_string(),
        rule_name: "Transport and Meal Vouchers".to_string(),
        legal_ref: format!("{}; {}", TRANSPORT_VOUCHER_LEGAL_REF, MEAL_VOUCHER_LEGAL_REF),
        input: serde_json::json!({
            "transport_voucher_value": employee.transport_voucher_value.to_string(),
            "meal_voucher_daily": employee.meal_voucher_daily.to_string(),
            "work_days_in_month": employee.work_days_in_month
        }),
        output: serde_json::json!({
            "transport_voucher": transport_voucher.to_string(),
            "meal_voucher": meal_voucher.to_string(),
            "in_gross": false
        }),
        reasoning: format!(
            "Transport R$ {}; meal R$ {} × {} days = R$ {}; benefits, not part of gross",
            transport_voucher, employee.meal_voucher_daily, employee.work_days_in_month, meal_voucher
        ),
    };

    BenefitsResult {
        transport_voucher,
        meal_voucher,
        audit_step,
    }
}
