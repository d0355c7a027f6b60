//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use std::collections::BTreeMap;
use std::str::FromStr;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{Employee, PayrollRecord};

use super::request::{CalculationRequest, NetSalaryRangeQuery, PayrollRunRequest};
use super::response::{ApiError, ApiErrorResponse, DeductionTotalResponse};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/employees", post(create_employee_handler))
        .route("/employees/:id", get(get_employee_handler))
        .route(
            "/employees/:id/payrolls",
            post(run_payroll_handler).get(list_employee_payrolls_handler),
        )
        .route("/employees/:id/deductions", get(employee_deductions_handler))
        .route("/payrolls", get(list_payrolls_handler))
        .route("/payrolls/by-month", get(payrolls_by_month_handler))
        .route("/payrolls/edge-cases", get(edge_case_payrolls_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Calculates a payslip for the employee in the body. Nothing is stored.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> ApiResult<Json<PayrollRecord>> {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let Json(request) = payload.map_err(|rejection| json_rejection(rejection, correlation_id))?;
    require_reference_month(&request.reference_month)?;

    match state
        .service()
        .preview(&request.employee, &request.reference_month, request.created_by)
    {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %record.employee_id(),
                reference_month = %record.reference_month(),
                gross_total = %record.calculation.gross_total(),
                net_salary = %record.calculation.net_salary,
                "Calculation completed successfully"
            );
            Ok(Json(record))
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            Err(err.into())
        }
    }
}

/// Handler for POST /employees.
async fn create_employee_handler(
    State(state): State<AppState>,
    payload: Result<Json<Employee>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Employee>)> {
    let correlation_id = Uuid::new_v4();
    let Json(employee) = payload.map_err(|rejection| json_rejection(rejection, correlation_id))?;

    let employee = state.service().register_employee(employee).map_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err, "Employee rejected");
        ApiErrorResponse::from(err)
    })?;

    info!(correlation_id = %correlation_id, employee_id = %employee.id, "Employee created");
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Handler for GET /employees/:id.
async fn get_employee_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Employee>> {
    Ok(Json(state.service().employee(&id)?))
}

/// Handler for POST /employees/:id/payrolls.
///
/// Calculates and stores the payslip for the month, or returns the one
/// already stored.
async fn run_payroll_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PayrollRunRequest>, JsonRejection>,
) -> ApiResult<Json<PayrollRecord>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %id, "Processing payroll run");

    let Json(request) = payload.map_err(|rejection| json_rejection(rejection, correlation_id))?;
    require_reference_month(&request.reference_month)?;

    let record = state
        .service()
        .calculate_for_employee(&id, &request.reference_month, request.created_by)
        .map_err(|err| {
            warn!(correlation_id = %correlation_id, error = %err, "Payroll run failed");
            ApiErrorResponse::from(err)
        })?;

    Ok(Json(record))
}

/// Handler for GET /employees/:id/payrolls.
async fn list_employee_payrolls_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<PayrollRecord>>> {
    Ok(Json(state.service().payrolls_for_employee(&id)?))
}

/// Handler for GET /employees/:id/deductions.
async fn employee_deductions_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeductionTotalResponse>> {
    let total_deductions = state.service().total_deductions_for_employee(&id)?;
    Ok(Json(DeductionTotalResponse {
        employee_id: id,
        total_deductions,
    }))
}

/// Handler for GET /payrolls, optionally filtered by `min_net` and `max_net`.
async fn list_payrolls_handler(
    State(state): State<AppState>,
    Query(query): Query<NetSalaryRangeQuery>,
) -> ApiResult<Json<Vec<PayrollRecord>>> {
    let min = parse_bound("min_net", query.min_net.as_deref())?;
    let max = parse_bound("max_net", query.max_net.as_deref())?;

    if min.zip(max).is_some_and(|(min, max)| min > max) {
        return Err(ApiErrorResponse::bad_request(ApiError::validation_error(
            "min_net must not exceed max_net",
        )));
    }

    Ok(Json(state.service().filter_by_net_salary_range(min, max)?))
}

/// Handler for GET /payrolls/by-month.
async fn payrolls_by_month_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<BTreeMap<String, Vec<PayrollRecord>>>> {
    Ok(Json(state.service().group_by_month()?))
}

/// Handler for GET /payrolls/edge-cases.
async fn edge_case_payrolls_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<PayrollRecord>>> {
    Ok(Json(state.service().edge_case_payrolls()?))
}

/// Translates a JSON extraction failure into a 400 response.
fn json_rejection(rejection: JsonRejection, correlation_id: Uuid) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") || body_text.contains("unknown variant") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

fn require_reference_month(reference_month: &str) -> ApiResult<()> {
    if reference_month.trim().is_empty() {
        return Err(ApiErrorResponse::bad_request(ApiError::validation_error(
            "reference_month must not be empty",
        )));
    }
    Ok(())
}

fn parse_bound(name: &str, value: Option<&str>) -> ApiResult<Option<Decimal>> {
    value
        .map(|raw| {
            Decimal::from_str(raw.trim()).map_err(|_| {
                ApiErrorResponse::bad_request(ApiError::validation_error(format!(
                    "{} must be a decimal number (got '{}')",
                    name, raw
                )))
            })
        })
        .transpose()
}
