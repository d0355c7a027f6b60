//! Payroll Calculation Engine for Brazilian labor-tax rules
//!
//! This crate turns an employee's contractual data into an itemized monthly
//! payslip: gross pay with periculosidade and insalubridade premiums and
//! overtime, the statutory INSS and IRRF deductions, the capped
//! vale-transporte discount, benefit co-pays, the employer FGTS deposit and
//! the resulting net pay, with an audit trace of every rule applied.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod service;
