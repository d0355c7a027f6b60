//! INSS (social security) contribution.
//!
//! The contribution is progressive and cumulative: each bracket's rate applies
//! only to the slice of gross pay inside that bracket, and pay above the last
//! bracket contributes nothing more.

use rust_decimal::Decimal;

use crate::config::InssBracket;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, InssDeduction};

use super::money::{effective_rate, round_money};

/// The legal reference for the INSS contribution table.
pub const INSS_LEGAL_REF: &str = "Lei 8.212/1991, art. 20; Portaria Interministerial MPS/MF nº 2/2024";

/// The result of calculating the INSS contribution.
#[derive(Debug, Clone)]
pub struct InssResult {
    /// The contribution withheld.
    pub deduction: InssDeduction,
    /// Whether gross pay exceeded the contribution ceiling.
    pub ceiling_reached: bool,
    /// The audit step recording this calculation, with one entry per slice.
    pub audit_step: AuditStep,
}

/// Calculates the progressive INSS contribution on `gross_total`.
///
/// # Errors
///
/// Returns [`EngineError::BracketNotFound`] if the table is empty or has a
/// gap between consecutive brackets.
///
/// # Examples
///
/// ```
/// use folha_engine::calculation::calculate_inss;
/// use folha_engine::config::RateTables;
/// use rust_decimal::Decimal;
///
/// let tables = RateTables::brazil_2024();
/// let result = calculate_inss(Decimal::new(260000, 2), &tables.inss_brackets, 8).unwrap();
///
/// // 1412.00 × 7.5% + 1188.00 × 9%
/// assert_eq!(result.deduction.discount, Decimal::new(21282, 2));
/// assert_eq!(result.deduction.effective_rate, Decimal::new(819, 4));
/// ```
pub fn calculate_inss(
    gross_total: Decimal,
    brackets: &[InssBracket],
    step_number: u32,
) -> EngineResult<InssResult> {
    if brackets.is_empty() {
        return Err(EngineError::BracketNotFound {
            table: "inss".to_string(),
            base: gross_total,
        });
    }

    let mut contribution = Decimal::ZERO;
    let mut previous_max = Decimal::ZERO;
    let mut slices = Vec::new();

    for bracket in brackets {
        if bracket.min != previous_max {
            return Err(EngineError::BracketNotFound {
                table: "inss".to_string(),
                base: previous_max,
            });
        }
        previous_max = bracket.max;

        if gross_total <= bracket.min {
            break;
        }

        let slice = gross_total.min(bracket.max) - bracket.min;
        let amount = slice * bracket.rate;
        contribution += amount;

        slices.push(serde_json::json!({
            "min": bracket.min.to_string(),
            "max": bracket.max.to_string(),
            "rate": bracket.rate.normalize().to_string(),
            "slice": slice.to_string(),
            "amount": amount.normalize().to_string()
        }));
    }

    let ceiling = brackets.last().map(|b| b.max).unwrap_or(Decimal::ZERO);
    let ceiling_reached = gross_total > ceiling;
    let discount = round_money(contribution);
    let rate = effective_rate(discount, gross_total);

    let reasoning = if ceiling_reached {
        format!(
            "Progressive contribution over {} brackets = R$ {}; gross R$ {} exceeds ceiling R$ {}",
            slices.len(),
            discount,
            gross_total,
            ceiling
        )
    } else {
        format!(
            "Progressive contribution over {} brackets = R$ {} ({}% effective)",
            slices.len(),
            discount,
            (rate * Decimal::ONE_HUNDRED).normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "inss".to_string(),
        rule_name: "INSS Contribution".to_string(),
        legal_ref: INSS_LEGAL_REF.to_string(),
        input: serde_json::json!({
            "gross_total": gross_total.to_string()
        }),
        output: serde_json::json!({
            "slices": slices,
            "discount": discount.to_string(),
            "effective_rate": rate.to_string(),
            "ceiling_reached": ceiling_reached
        }),
        reasoning,
    };

    Ok(InssResult {
        deduction: InssDeduction {
            calculation_base: gross_total,
            discount,
            effective_rate: rate,
        },
        ceiling_reached,
        audit_step,
    })
}
