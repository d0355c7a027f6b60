//! Benefit plan co-pays (health, dental, gym).

use rust_decimal::Decimal;

use crate::models::{AuditStep, BenefitPlanKind, Employee};

use super::money::round_money;

/// The legal reference for authorized payroll deductions.
pub const BENEFIT_PLANS_LEGAL_REF: &str = "CLT art. 462";

/// The co-pays discounted for the month.
#[derive(Debug, Clone)]
pub struct BenefitCoPayResult {
    /// Health plan co-pay.
    pub health: Decimal,
    /// Dental plan co-pay.
    pub dental: Decimal,
    /// Gym co-pay.
    pub gym: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

impl BenefitCoPayResult {
    /// Sum of all co-pays.
    pub fn total(&self) -> Decimal {
        self.health + self.dental + self.gym
    }
}

/// Passes the enrolled plans' monthly values through as deductions.
pub fn calculate_benefit_copays(employee: &Employee, step_number: u32) -> BenefitCoPayResult {
    let health = round_money(employee.benefit_plan_value(BenefitPlanKind::Health));
    let dental = round_money(employee.benefit_plan_value(BenefitPlanKind::Dental));
    let gym = round_money(employee.benefit_plan_value(BenefitPlanKind::Gym));

    let enrolled: Vec<&str> = employee
        .benefit_plans
        .iter()
        .map(|plan| match plan.kind {
            BenefitPlanKind::Health => "health",
            BenefitPlanKind::Dental => "dental",
            BenefitPlanKind::Gym => "gym",
        })
        .collect();

    let reasoning = if enrolled.is_empty() {
        "No benefit plans enrolled".to_string()
    } else {
        format!(
            "Enrolled in {}: health R$ {}, dental R$ {}, gym R$ {}",
            enrolled.join(", "),
            health,
            dental,
            gym
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "benefit_plans".to_string(),
        rule_name: "Benefit Plan Co-pays".to_string(),
        legal_ref: BENEFIT_PLANS_LEGAL_REF.to_string(),
        input: serde_json::json!({
            "enrolled": enrolled
        }),
        output: serde_json::json!({
            "health": health.to_string(),
            "dental": dental.to_string(),
            "gym": gym.to_string()
        }),
        reasoning,
    };

    BenefitCoPayResult {
        health,
        dental,
        gym,
        audit_step,
    }
}
