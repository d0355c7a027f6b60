//! Payroll service.
//!
//! Ties the engine to the repositories: looks employees up by id, calculates
//! each employee's payslip at most once per reference month, and answers the
//! reporting queries over stored records.

use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::calculation::calculate_payroll;
use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PayrollRecord};
use crate::repository::{
    EmployeeRepository, InMemoryEmployeeRepository, InMemoryPayrollRepository, PayrollRepository,
};

/// Calculates and stores payroll records.
///
/// Cheap to clone; clones share the configuration and repositories.
#[derive(Clone)]
pub struct PayrollService {
    config: Arc<PayrollConfig>,
    employees: Arc<dyn EmployeeRepository>,
    payrolls: Arc<dyn PayrollRepository>,
}

impl PayrollService {
    /// Creates a service over the given configuration and repositories.
    pub fn new(
        config: Arc<PayrollConfig>,
        employees: Arc<dyn EmployeeRepository>,
        payrolls: Arc<dyn PayrollRepository>,
    ) -> Self {
        Self {
            config,
            employees,
            payrolls,
        }
    }

    /// Creates a service backed by empty in-memory repositories.
    pub fn in_memory(config: PayrollConfig) -> Self {
        Self::new(
            Arc::new(config),
            Arc::new(InMemoryEmployeeRepository::new()),
            Arc::new(InMemoryPayrollRepository::new()),
        )
    }

    /// Returns the configuration calculations run against.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Validates and stores an employee, replacing any with the same id.
    pub fn register_employee(&self, employee: Employee) -> EngineResult<Employee> {
        employee.validate()?;
        self.employees.save(employee.clone())?;
        info!(employee_id = %employee.id, "Employee registered");
        Ok(employee)
    }

    /// Returns the employee with the given id.
    ///
    /// # Errors
    ///
    /// [`EngineError::EmployeeNotFound`] if no such employee exists.
    pub fn employee(&self, id: &str) -> EngineResult<Employee> {
        self.employees
            .find(id)?
            .ok_or_else(|| EngineError::EmployeeNotFound { id: id.to_string() })
    }

    /// Calculates an ad-hoc payslip without storing it.
    pub fn preview(
        &self,
        employee: &Employee,
        reference_month: &str,
        created_by: Option<String>,
    ) -> EngineResult<PayrollRecord> {
        let calculation = calculate_payroll(employee, reference_month, &self.config)?;
        Ok(PayrollRecord::new(calculation, created_by))
    }

    /// Calculates the payslip of a stored employee for a month.
    ///
    /// Idempotent: if a record already exists for the employee and month it
    /// is returned unchanged and nothing is recalculated.
    ///
    /// # Errors
    ///
    /// [`EngineError::EmployeeNotFound`] for an unknown id, plus any error of
    /// [`calculate_payroll`].
    pub fn calculate_for_employee(
        &self,
        employee_id: &str,
        reference_month: &str,
        created_by: Option<String>,
    ) -> EngineResult<PayrollRecord> {
        if let Some(existing) = self.payrolls.find(employee_id, reference_month)? {
            debug!(
                employee_id,
                reference_month,
                calculation_id = %existing.calculation_id,
                "Returning existing payroll record"
            );
            return Ok(existing);
        }

        let employee = self.employee(employee_id)?;
        let record = self.preview(&employee, reference_month, created_by)?;
        let stored = self.payrolls.insert_if_absent(record)?;

        info!(
            employee_id,
            reference_month,
            calculation_id = %stored.calculation_id,
            net_salary = %stored.calculation.net_salary,
            "Payroll calculated"
        );

        Ok(stored)
    }

    /// Returns every stored record for one employee, ordered by month.
    pub fn payrolls_for_employee(&self, employee_id: &str) -> EngineResult<Vec<PayrollRecord>> {
        self.payrolls.list_for_employee(employee_id)
    }

    /// Returns every stored record.
    pub fn all_payrolls(&self) -> EngineResult<Vec<PayrollRecord>> {
        self.payrolls.list_all()
    }

    /// Returns the records whose net salary lies within `[min, max]`.
    ///
    /// A missing bound is open.
    pub fn filter_by_net_salary_range(
        &self,
        min: Option<Decimal>,
        max: Option<Decimal>,
    ) -> EngineResult<Vec<PayrollRecord>> {
        let records = self.all_payrolls()?;
        Ok(records
            .into_iter()
            .filter(|record| {
                let net = record.calculation.net_salary;
                min.is_none_or(|min| net >= min) && max.is_none_or(|max| net <= max)
            })
            .collect())
    }

    /// Groups every stored record by reference month.
    pub fn group_by_month(&self) -> EngineResult<BTreeMap<String, Vec<PayrollRecord>>> {
        let mut groups: BTreeMap<String, Vec<PayrollRecord>> = BTreeMap::new();
        for record in self.all_payrolls()? {
            groups
                .entry(record.reference_month().to_string())
                .or_default()
                .push(record);
        }
        Ok(groups)
    }

    /// Sums the employee-side deductions over an employee's history.
    ///
    /// FGTS is an employer cost and is not included.
    pub fn total_deductions_for_employee(&self, employee_id: &str) -> EngineResult<Decimal> {
        Ok(self
            .payrolls_for_employee(employee_id)?
            .iter()
            .map(|record| record.calculation.deductions.total)
            .sum())
    }

    /// Returns records that need review: gross pay of zero or less, or
    /// deductions that consume the whole gross.
    pub fn edge_case_payrolls(&self) -> EngineResult<Vec<PayrollRecord>> {
        Ok(self
            .all_payrolls()?
            .into_iter()
            .filter(|record| {
                let gross = record.calculation.gross_total();
                gross <= Decimal::ZERO || record.calculation.deductions.total >= gross
            })
            .collect())
    }
}
