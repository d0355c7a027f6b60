//! Storage interfaces for employees and payroll records.
//!
//! The engine never talks to storage. These traits are what the service layer
//! depends on; [`InMemoryEmployeeRepository`] and [`InMemoryPayrollRepository`]
//! are the adapters shipped with the crate.

mod memory;

pub use memory::{InMemoryEmployeeRepository, InMemoryPayrollRepository};

use crate::error::EngineResult;
use crate::models::{Employee, PayrollRecord};

/// Looks up and stores employee snapshots.
pub trait EmployeeRepository: Send + Sync {
    /// Returns the employee with the given id, if any.
    fn find(&self, id: &str) -> EngineResult<Option<Employee>>;

    /// Inserts or replaces an employee, keyed by id.
    fn save(&self, employee: Employee) -> EngineResult<()>;

    /// Removes an employee. Returns whether it existed.
    fn delete(&self, id: &str) -> EngineResult<bool>;

    /// Returns every employee, ordered by id.
    fn list(&self) -> EngineResult<Vec<Employee>>;
}

/// Stores payroll records, at most one per employee and reference month.
pub trait PayrollRepository: Send + Sync {
    /// Stores `record` unless one already exists for its employee and month.
    ///
    /// Returns the stored record: the existing one if there was one, otherwise
    /// `record` itself. The check and the insert happen atomically.
    fn insert_if_absent(&self, record: PayrollRecord) -> EngineResult<PayrollRecord>;

    /// Returns the record for an employee and month, if any.
    fn find(&self, employee_id: &str, reference_month: &str) -> EngineResult<Option<PayrollRecord>>;

    /// Returns every record for one employee, ordered by reference month.
    fn list_for_employee(&self, employee_id: &str) -> EngineResult<Vec<PayrollRecord>>;

    /// Returns every record, ordered by employee id and then reference month.
    fn list_all(&self) -> EngineResult<Vec<PayrollRecord>>;
}
