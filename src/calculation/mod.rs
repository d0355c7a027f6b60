//! Calculation logic for the payroll engine.
//!
//! Each stage of the payslip lives in its own module and returns its result
//! together with the audit step that explains it: base pay resolution, the
//! risk premiums (periculosidade and insalubridade), overtime and the time
//! bank, voucher benefits, INSS, IRRF, the transport voucher discount,
//! benefit plan co-pays and the FGTS deposit. [`calculate_payroll`] runs
//! them in order.

mod base_pay;
mod benefit_plans;
mod benefits;
mod deductions;
mod earnings;
mod fgts;
mod hazard_pay;
mod inss;
mod irrf;
mod money;
mod overtime;
mod payroll;
mod transport_discount;
mod unhealthy_pay;

pub use base_pay::{BASE_PAY_LEGAL_REF, BasePayResult, resolve_base_pay};
pub use benefit_plans::{BENEFIT_PLANS_LEGAL_REF, BenefitCoPayResult, calculate_benefit_copays};
pub use benefits::{
    BenefitsResult, MEAL_VOUCHER_LEGAL_REF, TRANSPORT_VOUCHER_LEGAL_REF, calculate_benefits,
};
pub use deductions::{DeductionsResult, INSS_CEILING_WARNING, compute_deductions};
pub use earnings::{
    CUMULATIVE_PREMIUMS_WARNING, EarningsResult, PREMIUM_DROPPED_WARNING, TIME_BANK_WARNING,
    accumulate_earnings,
};
pub use fgts::{FGTS_LEGAL_REF, FgtsResult, calculate_fgts};
pub use hazard_pay::{HAZARD_PAY_LEGAL_REF, HazardPayResult, calculate_dangerous_bonus};
pub use inss::{INSS_LEGAL_REF, InssResult, calculate_inss};
pub use irrf::{
    DEPENDENT_DEDUCTION_LEGAL_REF, IRRF_LEGAL_REF, IrrfInput, IrrfResult, calculate_irrf,
    select_irrf_bracket,
};
pub use money::{MONEY_SCALE, RATE_SCALE, effective_rate, floor_money, round_money};
pub use overtime::{OVERTIME_LEGAL_REF, OvertimeResult, TIME_BANK_LEGAL_REF, calculate_overtime};
pub use payroll::{NEGATIVE_NET_WARNING, calculate_payroll};
pub use transport_discount::{
    TRANSPORT_DISCOUNT_LEGAL_REF, TransportDiscountResult, calculate_transport_discount,
};
pub use unhealthy_pay::{UNHEALTHY_PAY_LEGAL_REF, UnhealthyPayResult, calculate_unhealthy_bonus};
