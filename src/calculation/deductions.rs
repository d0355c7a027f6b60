//! Employee-side deductions.
//!
//! Runs INSS, IRRF, the transport voucher discount and benefit co-pays in
//! order. Each deduction is rounded before it feeds the next one.

use crate::config::PayrollConfig;
use crate::error::EngineResult;
use crate::models::{AuditStep, AuditWarning, Deductions, Earnings, Employee};

use super::benefit_plans::calculate_benefit_copays;
use super::inss::calculate_inss;
use super::irrf::{IrrfInput, calculate_irrf};
use super::transport_discount::calculate_transport_discount;

/// Warning raised when gross pay exceeds the INSS contribution ceiling.
pub const INSS_CEILING_WARNING: &str = "INSS_CEILING_REACHED";

/// The result of computing deductions.
#[derive(Debug, Clone)]
pub struct DeductionsResult {
    /// The deductions block of the payslip.
    pub deductions: Deductions,
    /// One audit step per rule applied, in order.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings raised while deducting.
    pub warnings: Vec<AuditWarning>,
}

/// Computes every employee-side deduction for the month.
///
/// # Errors
///
/// Propagates [`crate::error::EngineError::BracketNotFound`] from the INSS
/// and IRRF tables.
pub fn compute_deductions(
    employee: &Employee,
    earnings: &Earnings,
    config: &PayrollConfig,
    first_step: u32,
) -> EngineResult<DeductionsResult> {
    let tables = config.tables();

    let mut step = first_step;
    let mut audit_steps = Vec::new();
    let mut warnings = Vec::new();

    let inss = calculate_inss(earnings.gross_total, &tables.inss_brackets, step)?;
    audit_steps.push(inss.audit_step);
    step += 1;

    if inss.ceiling_reached {
        warnings.push(AuditWarning {
            code: INSS_CEILING_WARNING.to_string(),
            message: format!(
                "Gross R$ {} exceeds the INSS ceiling; contribution capped at R$ {}",
                earnings.gross_total, inss.deduction.discount
            ),
            severity: "low".to_string(),
        });
    }

    let irrf_input = IrrfInput {
        gross_total: earnings.gross_total,
        inss_discount: inss.deduction.discount,
        dependents: employee.dependents,
        pension_alimony: employee.pension_alimony,
    };
    let irrf = calculate_irrf(&irrf_input, tables, step)?;
    audit_steps.push(irrf.audit_step);
    step += 1;

    let transport = calculate_transport_discount(
        employee.transport_voucher_value,
        earnings.base_salary,
        tables.transport_discount_cap_rate,
        step,
    );
    audit_steps.push(transport.audit_step);
    step += 1;

    let copays = calculate_benefit_copays(employee, step);
    let copay_total = copays.total();
    audit_steps.push(copays.audit_step);

    let total = inss.deduction.discount + irrf.deduction.discount + transport.discount + copay_total;

    Ok(DeductionsResult {
        deductions: Deductions {
            inss: inss.deduction,
            irrf: irrf.deduction,
            transport_voucher_discount: transport.discount,
            health_plan_discount: copays.health,
            dental_plan_discount: copays.dental,
            gym_discount: copays.gym,
            total,
        },
        audit_steps,
        warnings,
    })
}
