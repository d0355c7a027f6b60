//! Overtime and time bank.
//!
//! Paid overtime is valued at the hourly wage times the overtime multiplier
//! and is part of gross pay. Hours compensated through the time bank carry no
//! value in the month they are worked; they are only reported.

use rust_decimal::Decimal;

use crate::models::{AuditStep, OvertimeCompensation, OvertimeEntry};

use super::money::round_money;

/// The legal reference for paid overtime.
pub const OVERTIME_LEGAL_REF: &str = "CLT art. 59, §1º";

/// The legal reference for time bank compensation.
pub const TIME_BANK_LEGAL_REF: &str = "CLT art. 59, §2º";

/// The result of valuing overtime.
#[derive(Debug, Clone)]
pub struct OvertimeResult {
    /// The overtime pay included in gross.
    pub value: Decimal,
    /// Hours credited to the time bank instead of being paid.
    pub banked_hours: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Values the month's overtime.
///
/// `exact_hourly_wage` should be the unrounded wage so that rounding is only
/// applied once, to the final value.
///
/// # Examples
///
/// ```
/// use folha_engine::calculation::calculate_overtime;
/// use folha_engine::models::{OvertimeCompensation, OvertimeEntry};
/// use rust_decimal::Decimal;
///
/// let entry = OvertimeEntry {
///     hours: Decimal::from(10),
///     compensation: OvertimeCompensation::Paid,
/// };
///
/// // $12.50/h × 1.5 × 10h
/// let result = calculate_overtime(Some(&entry), Decimal::new(1250, 2), Decimal::new(15, 1), 4);
/// assert_eq!(result.value, Decimal::new(18750, 2));
/// assert_eq!(result.banked_hours, Decimal::ZERO);
/// ```
pub fn calculate_overtime(
    overtime: Option<&OvertimeEntry>,
    exact_hourly_wage: Decimal,
    multiplier: Decimal,
    step_number: u32,
) -> OvertimeResult {
    let Some(entry) = overtime.filter(|entry| entry.hours > Decimal::ZERO) else {
        let audit_step = AuditStep {
            step_number,
            rule_id: "overtime".to_string(),
            rule_name: "Overtime".to_string(),
            legal_ref: OVERTIME_LEGAL_REF.to_string(),
            input: serde_json::json!({
                "hours": "0"
            }),
            output: serde_json::json!({
                "value": "0.00",
                "banked_hours": "0"
            }),
            reasoning: "No overtime worked this month".to_string(),
        };

        return OvertimeResult {
            value: round_money(Decimal::ZERO),
            banked_hours: Decimal::ZERO,
            audit_step,
        };
    };

    match entry.compensation {
        OvertimeCompensation::Paid => {
            let value = round_money(exact_hourly_wage * multiplier * entry.hours);

            let audit_step = AuditStep {
                step_number,
                rule_id: "overtime".to_string(),
                rule_name: "Overtime".to_string(),
                legal_ref: OVERTIME_LEGAL_REF.to_string(),
                input: serde_json::json!({
                    "hours": entry.hours.normalize().to_string(),
                    "compensation": "paid",
                    "hourly_wage": round_money(exact_hourly_wage).to_string(),
                    "multiplier": multiplier.normalize().to_string()
                }),
                output: serde_json::json!({
                    "value": value.to_string(),
                    "banked_hours": "0"
                }),
                reasoning: format!(
                    "{}h × R$ {}/h × {} = R$ {}",
                    entry.hours.normalize(),
                    round_money(exact_hourly_wage),
                    multiplier.normalize(),
                    value
                ),
            };

            OvertimeResult {
                value,
                banked_hours: Decimal::ZERO,
                audit_step,
            }
        }
        OvertimeCompensation::TimeBank => {
            let audit_step = AuditStep {
                step_number,
                rule_id: "time_bank".to_string(),
                rule_name: "Time Bank".to_string(),
                legal_ref: TIME_BANK_LEGAL_REF.to_string(),
                input: serde_json::json!({
                    "hours": entry.hours.normalize().to_string(),
                    "compensation": "time_bank"
                }),
                output: serde_json::json!({
                    "value": "0.00",
                    "banked_hours": entry.hours.normalize().to_string()
                }),
                reasoning: format!(
                    "{}h credited to the time bank - compensated with time off, not paid",
                    entry.hours.normalize()
                ),
            };

            OvertimeResult {
                value: round_money(Decimal::ZERO),
                banked_hours: entry.hours,
                audit_step,
            }
        }
    }
}
