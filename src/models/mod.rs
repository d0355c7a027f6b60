//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod payroll_calculation;
mod payroll_record;

pub use employee::{
    BenefitPlan, BenefitPlanKind, Employee, MAX_MONEY, MAX_OVERTIME_HOURS, OvertimeCompensation,
    OvertimeEntry, UnhealthyLevel,
};
pub use payroll_calculation::{
    AuditStep, AuditTrace, AuditWarning, BasePay, Deductions, Earnings, InssDeduction,
    IrrfDeduction, PayrollCalculation,
};
pub use payroll_record::PayrollRecord;
