//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading rate tables,
//! validating employees and calculating a payslip.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the payroll engine.
///
/// Every fallible operation in the crate returns this error type, so callers
/// (the service layer and the HTTP API) can translate it in one place.
///
/// # Example
///
/// ```
/// use folha_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/tables.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/tables.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A rate table is misconfigured (gap between brackets, rate out of range, ...).
    #[error("Invalid {table} rate table: {message}")]
    InvalidRateTable {
        /// The table that failed validation ("inss", "irrf", "constants").
        table: String,
        /// A description of the problem.
        message: String,
    },

    /// No bracket of a rate table covers the given base.
    #[error("No {table} bracket covers base {base}")]
    BracketNotFound {
        /// The table that was searched.
        table: String,
        /// The base that fell outside every bracket.
        base: Decimal,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The work schedule does not yield a positive number of monthly hours.
    #[error("Degenerate work schedule: {message}")]
    DegenerateSchedule {
        /// A description of the schedule problem.
        message: String,
    },

    /// The employee lookup returned nothing for the given id.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// A repository could not complete the operation.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidEmployee`] error.
    pub fn invalid_employee(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidEmployee {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for an [`EngineError::InvalidRateTable`] error.
    pub fn invalid_table(table: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidRateTable {
            table: table.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
