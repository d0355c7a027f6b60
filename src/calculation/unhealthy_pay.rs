//! Insalubridade (unhealthy-conditions premium) calculation.
//!
//! The premium is a tiered percentage of the national minimum wage, not of
//! the employee's salary.

use rust_decimal::Decimal;

use crate::config::UnhealthyRates;
use crate::models::{AuditStep, UnhealthyLevel};

use super::money::round_money;

/// The legal reference for the unhealthy-conditions premium.
pub const UNHEALTHY_PAY_LEGAL_REF: &str = "CLT art. 192";

/// The result of calculating the unhealthy-conditions premium.
#[derive(Debug, Clone)]
pub struct UnhealthyPayResult {
    /// The premium amount, zero for [`UnhealthyLevel::None`].
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the insalubridade premium: `minimum_wage × rate[level]`.
///
/// # Examples
///
/// ```
/// use folha_engine::calculation::calculate_unhealthy_bonus;
/// use folha_engine::config::RateTables;
/// use folha_engine::models::UnhealthyLevel;
/// use rust_decimal::Decimal;
///
/// let tables = RateTables::brazil_2024();
/// let result = calculate_unhealthy_bonus(
///     UnhealthyLevel::High,
///     tables.minimum_wage,
///     &tables.unhealthy_rates,
///     3,
/// );
/// assert_eq!(result.amount, Decimal::new(56480, 2));
/// ```
pub fn calculate_unhealthy_bonus(
    level: UnhealthyLevel,
    minimum_wage: Decimal,
    rates: &UnhealthyRates,
    step_number: u32,
) -> UnhealthyPayResult {
    let rate = rates.rate_for(level);
    let amount = round_money(minimum_wage * rate);

    let reasoning = if level == UnhealthyLevel::None {
        "No unhealthy exposure - no insalubridade".to_string()
    } else {
        format!(
            "Level {}: minimum wage R$ {} × {}% = R$ {}",
            level,
            minimum_wage,
            (rate * Decimal::ONE_HUNDRED).normalize(),
            amount
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "unhealthy_pay".to_string(),
        rule_name: "Insalubridade".to_string(),
        legal_ref: UNHEALTHY_PAY_LEGAL_REF.to_string(),
        input: serde_json::json!({
            "unhealthy_level": level.as_str(),
            "minimum_wage": minimum_wage.to_string(),
            "rate": rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "amount": amount.to_string()
        }),
        reasoning,
    };

    UnhealthyPayResult { amount, audit_step }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RateTables;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn bonus_for(level: UnhealthyLevel) -> Decimal {
        let tables = RateTables::brazil_2024();
        calculate_unhealthy_bonus(level, tables.minimum_wage, &tables.unhealthy_rates, 1).amount
    }

    #[test]
    fn test_tiers_on_minimum_wage() {
        assert_eq!(bonus_for(UnhealthyLevel::None), dec("0.00"));
        assert_eq!(bonus_for(UnhealthyLevel::Low), dec("141.20"));
        assert_eq!(bonus_for(UnhealthyLevel::Medium), dec("282.40"));
        assert_eq!(bonus_for(UnhealthyLevel::High), dec("564.80"));
    }

    #[test]
    fn test_premium_ignores_salary() {
        // The premium depends only on the minimum wage and the level.
        let tables = RateTables::brazil_2024();
        let result = calculate_unhealthy_bonus(
            UnhealthyLevel::Medium,
            tables.minimum_wage,
            &tables.unhealthy_rates,
            1,
        );
        assert_eq!(result.audit_step.input["minimum_wage"], "1412.00");
        assert_eq!(result.amount, dec("282.40"));
    }

    #[test]
    fn test_audit_step_records_level() {
        let tables = RateTables::brazil_2024();
        let result = calculate_unhealthy_bonus(
            UnhealthyLevel::Low,
            tables.minimum_wage,
            &tables.unhealthy_rates,
            4,
        );
        assert_eq!(result.audit_step.step_number, 4);
        assert_eq!(result.audit_step.input["unhealthy_level"], "low");
        assert!(result.audit_step.reasoning.contains("10%"));
    }

    #[test]
    fn test_none_level_reasoning() {
        let tables = RateTables::brazil_2024();
        let result = calculate_unhealthy_bonus(
            UnhealthyLevel::None,
            tables.minimum_wage,
            &tables.unhealthy_rates,
            1,
        );
        assert!(result.audit_step.reasoning.contains("no insalubridade"));
    }
}
