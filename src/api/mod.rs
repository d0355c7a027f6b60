//! HTTP API module for the payroll engine.
//!
//! This module provides the REST API endpoints for calculating payslips and
//! managing the employee registry and payroll history.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, NetSalaryRangeQuery, PayrollRunRequest};
pub use response::{ApiError, ApiErrorResponse, DeductionTotalResponse};
pub use state::AppState;
