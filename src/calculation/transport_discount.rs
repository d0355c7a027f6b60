//! Vale-transporte discount.
//!
//! The employee pays for the transport voucher up to a fixed share of the base
//! salary. The employer covers the rest.

use rust_decimal::Decimal;

use crate::models::AuditStep;

use super::money::{floor_money, round_money};

/// The legal reference for the transport voucher discount cap.
pub const TRANSPORT_DISCOUNT_LEGAL_REF: &str = "Lei 7.418/1985, art. 4º, parágrafo único";

/// The result of calculating the transport voucher discount.
#[derive(Debug, Clone)]
pub struct TransportDiscountResult {
    /// The amount discounted from the employee.
    pub discount: Decimal,
    /// Whether the cap limited the discount.
    pub cap_applied: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates `min(voucher_value, base_salary × cap_rate)`.
///
/// The cap is truncated to cents so the discount never exceeds the legal
/// share of the salary.
///
/// # Examples
///
/// ```
/// use folha_engine::calculation::calculate_transport_discount;
/// use rust_decimal::Decimal;
///
/// let result = calculate_transport_discount(
///     Decimal::new(50000, 2), // R$ 500.00 voucher
///     Decimal::new(100000, 2), // R$ 1000.00 salary
///     Decimal::new(6, 2),
///     10,
/// );
/// assert_eq!(result.discount, Decimal::new(6000, 2));
/// assert!(result.cap_applied);
/// ```
pub fn calculate_transport_discount(
    voucher_value: Decimal,
    base_salary: Decimal,
    cap_rate: Decimal,
    step_number: u32,
) -> TransportDiscountResult {
    let cap = floor_money(base_salary * cap_rate);
    let voucher = round_money(voucher_value);
    let cap_applied = voucher > cap;
    let discount = if cap_applied { cap } else { voucher };

    let reasoning = if voucher.is_zero() {
        "No transport voucher - no discount".to_string()
    } else if cap_applied {
        format!(
            "Voucher R$ {} exceeds {}% of R$ {} - discount capped at R$ {}",
            voucher,
            (cap_rate * Decimal::ONE_HUNDRED).normalize(),
            base_salary,
            discount
        )
    } else {
        format!(
            "Voucher R$ {} is within {}% of R$ {} (R$ {}) - discounted in full",
            voucher,
            (cap_rate * Decimal::ONE_HUNDRED).normalize(),
            base_salary,
            cap
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "transport_discount".to_string(),
        rule_name: "Transport Voucher Discount".to_string(),
        legal_ref: TRANSPORT_DISCOUNT_LEGAL_REF.to_string(),
        input: serde_json::json!({
            "voucher_value": voucher.to_string(),
            "base_salary": base_salary.to_string(),
            "cap_rate": cap_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "cap": cap.to_string(),
            "discount": discount.to_string(),
            "cap_applied": cap_applied
        }),
        reasoning,
    };

    TransportDiscountResult {
        discount,
        cap_applied,
        audit_step,
    }
}
