//! In-memory repository adapters.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::{PoisonError, RwLock};

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PayrollRecord};

use super::{EmployeeRepository, PayrollRepository};

fn poisoned<T>(_: PoisonError<T>) -> EngineError {
    EngineError::Storage {
        message: "repository lock poisoned by a panicked writer".to_string(),
    }
}

/// Employees kept in a map behind a read-write lock.
#[derive(Debug, Default)]
pub struct InMemoryEmployeeRepository {
    employees: RwLock<BTreeMap<String, Employee>>,
}

impl InMemoryEmployeeRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `employees`.
    pub fn with_employees(employees: impl IntoIterator<Item = Employee>) -> Self {
        let map = employees
            .into_iter()
            .map(|employee| (employee.id.clone(), employee))
            .collect();
        Self {
            employees: RwLock::new(map),
        }
    }
}

impl EmployeeRepository for InMemoryEmployeeRepository {
    fn find(&self, id: &str) -> EngineResult<Option<Employee>> {
        let employees = self.employees.read().map_err(poisoned)?;
        Ok(employees.get(id).cloned())
    }

    fn save(&self, employee: Employee) -> EngineResult<()> {
        let mut employees = self.employees.write().map_err(poisoned)?;
        debug!(employee_id = %employee.id, "Saving employee");
        employees.insert(employee.id.clone(), employee);
        Ok(())
    }

    fn delete(&self, id: &str) -> EngineResult<bool> {
        let mut employees = self.employees.write().map_err(poisoned)?;
        Ok(employees.remove(id).is_some())
    }

    fn list(&self) -> EngineResult<Vec<Employee>> {
        let employees = self.employees.read().map_err(poisoned)?;
        Ok(employees.values().cloned().collect())
    }
}

/// Payroll records keyed by `(employee_id, reference_month)`.
#[derive(Debug, Default)]
pub struct InMemoryPayrollRepository {
    records: RwLock<BTreeMap<(String, String), PayrollRecord>>,
}

impl InMemoryPayrollRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PayrollRepository for InMemoryPayrollRepository {
    fn insert_if_absent(&self, record: PayrollRecord) -> EngineResult<PayrollRecord> {
        let mut records = self.records.write().map_err(poisoned)?;
        let key = (
            record.employee_id().to_string(),
            record.reference_month().to_string(),
        );

        match records.entry(key) {
            Entry::Occupied(existing) => Ok(existing.get().clone()),
            Entry::Vacant(slot) => {
                debug!(
                    employee_id = %record.employee_id(),
                    reference_month = %record.reference_month(),
                    calculation_id = %record.calculation_id,
                    "Storing payroll record"
                );
                Ok(slot.insert(record).clone())
            }
        }
    }

    fn find(&self, employee_id: &str, reference_month: &str) -> EngineResult<Option<PayrollRecord>> {
        let records = self.records.read().map_err(poisoned)?;
        let key = (employee_id.to_string(), reference_month.to_string());
        Ok(records.get(&key).cloned())
    }

    fn list_for_employee(&self, employee_id: &str) -> EngineResult<Vec<PayrollRecord>> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records
            .iter()
            .filter(|((id, _), _)| id == employee_id)
            .map(|(_, record)| record.clone())
            .collect())
    }

    fn list_all(&self) -> EngineResult<Vec<PayrollRecord>> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::calculate_payroll;
    use crate::config::PayrollConfig;
    use crate::models::UnhealthyLevel;
    use rust_decimal::Decimal;
    use std::sync::Arc;
    use std::thread;

    fn create_test_employee(id: &str) -> Employee {
        Employee {
            id: id.to_string(),
            name: format!("Employee {}", id),
            cpf: String::new(),
            gross_salary: Decimal::new(300000, 2),
            hours_per_day: Decimal::from(8),
            days_per_week: 5,
            work_days_in_month: 22,
            dependents: 0,
            is_dangerous: false,
            unhealthy_level: UnhealthyLevel::None,
            transport_voucher_value: Decimal::ZERO,
            meal_voucher_daily: Decimal::ZERO,
            benefit_plans: vec![],
            overtime: None,
            pension_alimony: Decimal::ZERO,
        }
    }

    fn create_record(employee_id: &str, month: &str) -> PayrollRecord {
        let calculation = calculate_payroll(
            &create_test_employee(employee_id),
            month,
            &PayrollConfig::brazil_2024(),
        )
        .unwrap();
        PayrollRecord::new(calculation, None)
    }

    #[test]
    fn test_employee_save_and_find() {
        let repo = InMemoryEmployeeRepository::new();
        repo.save(create_test_employee("emp_001")).unwrap();

        let found = repo.find("emp_001").unwrap();
        assert_eq!(found.unwrap().name, "Employee emp_001");
        assert!(repo.find("emp_999").unwrap().is_none());
    }

    #[test]
    fn test_employee_save_replaces() {
        let repo = InMemoryEmployeeRepository::new();
        repo.save(create_test_employee("emp_001")).unwrap();

        let mut updated = create_test_employee("emp_001");
        updated.name = "Renamed".to_string();
        repo.save(updated).unwrap();

        assert_eq!(repo.list().unwrap().len(), 1);
        assert_eq!(repo.find("emp_001").unwrap().unwrap().name, "Renamed");
    }

    #[test]
    fn test_employee_delete() {
        let repo = InMemoryEmployeeRepository::with_employees(vec![create_test_employee("emp_001")]);

        assert!(repo.delete("emp_001").unwrap());
        assert!(!repo.delete("emp_001").unwrap());
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_employee_list_ordered_by_id() {
        let repo = InMemoryEmployeeRepository::with_employees(vec![
            create_test_employee("emp_003"),
            create_test_employee("emp_001"),
            create_test_employee("emp_002"),
        ]);

        let ids: Vec<String> = repo.list().unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["emp_001", "emp_002", "emp_003"]);
    }

    #[test]
    fn test_insert_if_absent_keeps_first_record() {
        let repo = InMemoryPayrollRepository::new();
        let first = create_record("emp_001", "2024-06");
        let second = create_record("emp_001", "2024-06");

        let stored_first = repo.insert_if_absent(first.clone()).unwrap();
        let stored_second = repo.insert_if_absent(second).unwrap();

        assert_eq!(stored_first.calculation_id, first.calculation_id);
        assert_eq!(stored_second.calculation_id, first.calculation_id);
        assert_eq!(repo.list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_find_by_employee_and_month() {
        let repo = InMemoryPayrollRepository::new();
        repo.insert_if_absent(create_record("emp_001", "2024-06")).unwrap();

        assert!(repo.find("emp_001", "2024-06").unwrap().is_some());
        assert!(repo.find("emp_001", "2024-07").unwrap().is_none());
        assert!(repo.find("emp_002", "2024-06").unwrap().is_none());
    }

    #[test]
    fn test_list_for_employee_ordered_by_month() {
        let repo = InMemoryPayrollRepository::new();
        repo.insert_if_absent(create_record("emp_001", "2024-07")).unwrap();
        repo.insert_if_absent(create_record("emp_002", "2024-06")).unwrap();
        repo.insert_if_absent(create_record("emp_001", "2024-06")).unwrap();

        let months: Vec<String> = repo
            .list_for_employee("emp_001")
            .unwrap()
            .iter()
            .map(|r| r.reference_month().to_string())
            .collect();
        assert_eq!(months, vec!["2024-06", "2024-07"]);
        assert_eq!(repo.list_all().unwrap().len(), 3);
    }

    #[test]
    fn test_concurrent_inserts_store_one_record() {
        let repo = Arc::new(InMemoryPayrollRepository::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = Arc::clone(&repo);
                thread::spawn(move || {
                    repo.insert_if_absent(create_record("emp_001", "2024-06"))
                        .unwrap()
                        .calculation_id
                })
            })
            .collect();

        let ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(ids.iter().all(|id| *id == ids[0]));
        assert_eq!(repo.list_all().unwrap().len(), 1);
    }
}
