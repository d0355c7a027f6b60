//! FGTS employer deposit.
//!
//! FGTS is an employer cost reported on the payslip. It is never withheld
//! from the employee.

use rust_decimal::Decimal;

use crate::models::AuditStep;

use super::money::round_money;

/// The legal reference for the FGTS deposit.
pub const FGTS_LEGAL_REF: &str = "Lei 8.036/1990, art. 15";

/// The result of calculating the FGTS deposit.
#[derive(Debug, Clone)]
pub struct FgtsResult {
    /// The monthly deposit.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates `gross_total × fgts_rate`.
///
/// ```
/// use folha_engine::calculation::calculate_fgts;
/// use rust_decimal::Decimal;
///
/// let result = calculate_fgts(Decimal::new(141200, 2), Decimal::new(8, 2), 12);
/// assert_eq!(result.amount, Decimal::new(11296, 2));
/// ```
pub fn calculate_fgts(gross_total: Decimal, fgts_rate: Decimal, step_number: u32) -> FgtsResult {
    let amount = round_money(gross_total * fgts_rate);

    let audit_step = AuditStep {
        step_number,
        rule_id: "fgts".to_string(),
        rule_name: "FGTS Deposit".to_string(),
        legal_ref: FGTS_LEGAL_REF.to_string(),
        input: serde_json::json!({
            "gross_total": gross_total.to_string(),
            "fgts_rate": fgts_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "amount": amount.to_string(),
            "withheld_from_employee": false
        }),
        reasoning: format!(
            "R$ {} × {}% = R$ {} (employer cost, not deducted from net)",
            gross_total,
            (fgts_rate * Decimal::ONE_HUNDRED).normalize(),
            amount
        ),
    };

    FgtsResult { amount, audit_step }
}
