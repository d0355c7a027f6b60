//! IRRF (income tax withheld at source).
//!
//! Unlike INSS, IRRF uses a single bracket: the base is located in the table
//! and that bracket's rate and fixed deduction apply to the whole base.

use rust_decimal::Decimal;

use crate::config::{IrrfBracket, RateTables};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, IrrfDeduction};

use super::money::{effective_rate, round_money};

/// The legal reference for the IRRF table.
pub const IRRF_LEGAL_REF: &str = "Lei 14.848/2024";

/// The legal reference for the per-dependent deduction.
pub const DEPENDENT_DEDUCTION_LEGAL_REF: &str = "Lei 9.250/1995, art. 4º";

/// The inputs to the IRRF calculation.
#[derive(Debug, Clone, Copy)]
pub struct IrrfInput {
    /// Gross total for the month.
    pub gross_total: Decimal,
    /// The INSS contribution already withheld, rounded to cents.
    pub inss_discount: Decimal,
    /// Number of dependents.
    pub dependents: u32,
    /// Court-ordered alimony withheld.
    pub pension_alimony: Decimal,
}

/// The result of calculating IRRF.
#[derive(Debug, Clone)]
pub struct IrrfResult {
    /// The tax withheld and its base.
    pub deduction: IrrfDeduction,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Finds the bracket containing `base`.
///
/// The first bracket includes its lower bound; later brackets start just
/// above the previous bracket's upper bound. A bracket without `max` is
/// unbounded.
pub fn select_irrf_bracket(base: Decimal, brackets: &[IrrfBracket]) -> EngineResult<&IrrfBracket> {
    brackets
        .iter()
        .enumerate()
        .find(|(index, bracket)| {
            let above_min = if *index == 0 {
                base >= bracket.min
            } else {
                base > bracket.min
            };
            above_min && bracket.max.is_none_or(|max| base <= max)
        })
        .map(|(_, bracket)| bracket)
        .ok_or_else(|| EngineError::BracketNotFound {
            table: "irrf".to_string(),
            base,
        })
}

/// Calculates the income tax withheld.
///
/// The base is `max(0, gross − INSS − dependents × deduction − alimony)`, and
/// the tax is `max(0, base × rate − fixed_deduction)` for the bracket that
/// contains the base.
///
/// # Errors
///
/// Returns [`EngineError::BracketNotFound`] when no bracket contains the base.
///
/// # Examples
///
/// ```
/// use folha_engine::calculation::{IrrfInput, calculate_irrf};
/// use folha_engine::config::RateTables;
/// use rust_decimal::Decimal;
///
/// let tables = RateTables::brazil_2024();
/// let input = IrrfInput {
///     gross_total: Decimal::new(260000, 2),
///     inss_discount: Decimal::new(21282, 2),
///     dependents: 0,
///     pension_alimony: Decimal::ZERO,
/// };
///
/// let result = calculate_irrf(&input, &tables, 9).unwrap();
/// assert_eq!(result.deduction.calculation_base, Decimal::new(238718, 2));
/// assert_eq!(result.deduction.discount, Decimal::new(960, 2));
/// ```
pub fn calculate_irrf(
    input: &IrrfInput,
    tables: &RateTables,
    step_number: u32,
) -> EngineResult<IrrfResult> {
    let dependent_deductions =
        round_money(tables.dependent_deduction * Decimal::from(input.dependents));

    let raw_base =
        input.gross_total - input.inss_discount - dependent_deductions - input.pension_alimony;
    let calculation_base = round_money(raw_base.max(Decimal::ZERO));

    let bracket = select_irrf_bracket(calculation_base, &tables.irrf_brackets)?;
    let discount = round_money(
        (calculation_base * bracket.rate - bracket.fixed_deduction).max(Decimal::ZERO),
    );
    let rate = effective_rate(discount, input.gross_total);

    let reasoning = if discount.is_zero() {
        format!(
            "Base R$ {} (R$ {} - INSS R$ {} - {} dependents R$ {} - alimony R$ {}) is exempt",
            calculation_base,
            input.gross_total,
            input.inss_discount,
            input.dependents,
            dependent_deductions,
            input.pension_alimony
        )
    } else {
        format!(
            "Base R$ {} (R$ {} - INSS R$ {} - {} dependents R$ {} - alimony R$ {}) × {}% - R$ {} = R$ {}",
            calculation_base,
            input.gross_total,
            input.inss_discount,
            input.dependents,
            dependent_deductions,
            input.pension_alimony,
            (bracket.rate * Decimal::ONE_HUNDRED).normalize(),
            bracket.fixed_deduction,
            discount
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "irrf".to_string(),
        rule_name: "IRRF Withholding".to_string(),
        legal_ref: format!("{}; {}", IRRF_LEGAL_REF, DEPENDENT_DEDUCTION_LEGAL_REF),
        input: serde_json::json!({
            "gross_total": input.gross_total.to_string(),
            "inss_discount": input.inss_discount.to_string(),
            "dependents": input.dependents,
            "dependent_deduction": tables.dependent_deduction.to_string(),
            "pension_alimony": input.pension_alimony.to_string()
        }),
        output: serde_json::json!({
            "dependent_deductions": dependent_deductions.to_string(),
            "calculation_base": calculation_base.to_string(),
            "bracket_rate": bracket.rate.normalize().to_string(),
            "fixed_deduction": bracket.fixed_deduction.to_string(),
            "discount": discount.to_string(),
            "effective_rate": rate.to_string()
        }),
        reasoning,
    };

    Ok(IrrfResult {
        deduction: IrrfDeduction {
            dependent_deductions,
            calculation_base,
            bracket_rate: bracket.rate,
            discount,
            effective_rate: rate,
        },
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn irrf(gross: &str, inss: &str, dependents: u32, alimony: &str) -> IrrfResult {
        let input = IrrfInput {
            gross_total: dec(gross),
            inss_discount: dec(inss),
            dependents,
            pension_alimony: dec(alimony),
        };
        calculate_irrf(&input, &RateTables::brazil_2024(), 1).unwrap()
    }

    #[test]
    fn test_exempt_below_first_limit() {
        let result = irrf("1412.00", "105.90", 0, "0");
        assert_eq!(result.deduction.calculation_base, dec("1306.10"));
        assert_eq!(result.deduction.discount, Decimal::ZERO);
        assert_eq!(result.deduction.bracket_rate, Decimal::ZERO);
        assert!(result.audit_step.reasoning.contains("exempt"));
    }

    #[test]
    fn test_second_bracket_hazard_scenario() {
        let result = irrf("2600.00", "212.82", 0, "0");
        // 2387.18 × 7.5% - 169.44 = 9.5985
        assert_eq!(result.deduction.calculation_base, dec("2387.18"));
        assert_eq!(result.deduction.discount, dec("9.60"));
        assert_eq!(result.deduction.bracket_rate, dec("0.075"));
    }

    #[test]
    fn test_second_bracket_unhealthy_scenario() {
        let result = irrf("2564.80", "209.65", 0, "0");
        // 2355.15 × 7.5% - 169.44 = 7.19625
        assert_eq!(result.deduction.discount, dec("7.20"));
    }

    #[test]
    fn test_dependents_and_alimony() {
        let result = irrf("5000.00", "518.82", 2, "100.00");
        assert_eq!(result.deduction.dependent_deductions, dec("379.18"));
        assert_eq!(result.deduction.calculation_base, dec("4002.00"));
        assert_eq!(result.deduction.bracket_rate, dec("0.225"));
        // 4002.00 × 22.5% - 662.77 = 237.68
        assert_eq!(result.deduction.discount, dec("237.68"));
    }

    #[test]
    fn test_top_bracket_is_unbounded() {
        let result = irrf("20000.00", "908.86", 0, "0");
        assert_eq!(result.deduction.calculation_base, dec("19091.14"));
        assert_eq!(result.deduction.bracket_rate, dec("0.275"));
        // 19091.14 × 27.5% - 896.00 = 4354.0635
        assert_eq!(result.deduction.discount, dec("4354.06"));
    }

    #[test]
    fn test_base_floored_at_zero() {
        let result = irrf("1000.00", "75.00", 5, "500.00");
        assert_eq!(result.deduction.calculation_base, dec("0.00"));
        assert_eq!(result.deduction.discount, Decimal::ZERO);
    }

    #[test]
    fn test_zero_dependents_base_is_gross_minus_inss() {
        let result = irrf("3456.78", "301.23", 0, "0");
        assert_eq!(result.deduction.calculation_base, dec("3155.55"));
    }

    #[test]
    fn test_bracket_boundaries() {
        let tables = RateTables::brazil_2024();
        let brackets = &tables.irrf_brackets;

        assert_eq!(select_irrf_bracket(dec("0"), brackets).unwrap().rate, dec("0"));
        assert_eq!(select_irrf_bracket(dec("2259.20"), brackets).unwrap().rate, dec("0"));
        assert_eq!(
            select_irrf_bracket(dec("2259.21"), brackets).unwrap().rate,
            dec("0.075")
        );
        assert_eq!(
            select_irrf_bracket(dec("4664.68"), brackets).unwrap().rate,
            dec("0.225")
        );
        assert_eq!(
            select_irrf_bracket(dec("4664.69"), brackets).unwrap().rate,
            dec("0.275")
        );
    }

    #[test]
    fn test_no_bracket_fails_loudly() {
        let brackets = vec![IrrfBracket {
            min: dec("0"),
            max: Some(dec("1000")),
            rate: dec("0"),
            fixed_deduction: dec("0"),
        }];
        match select_irrf_bracket(dec("1500"), &brackets) {
            Err(EngineError::BracketNotFound { table, base }) => {
                assert_eq!(table, "irrf");
                assert_eq!(base, dec("1500"));
            }
            other => panic!("Expected BracketNotFound, got {:?}", other),
        }
    }
}
