//! Integration tests for the payroll engine HTTP API.
//!
//! This test suite covers:
//! - Reference payslips (minimum wage, hazard, insalubridade, transport cap,
//!   dependents and alimony)
//! - Premium policy loaded from configuration
//! - Employee registry and idempotent monthly payroll runs
//! - Payroll queries (net salary range, grouping by month, deduction totals,
//!   edge cases)
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use folha_engine::api::{AppState, create_router};
use folha_engine::config::{ConfigLoader, PremiumPolicy};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/br2024").expect("Failed to load config");
    AppState::in_memory(config.into_config())
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Reads a decimal field that the API serializes as a string.
fn field(json: &Value, pointer: &str) -> Decimal {
    let raw = json
        .pointer(pointer)
        .unwrap_or_else(|| panic!("missing {} in {}", pointer, json));
    decimal(raw.as_str().unwrap_or_else(|| panic!("{} is not a string", pointer)))
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(router, request).await
}

fn create_employee(id: &str, salary: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Employee {}", id),
        "cpf": "123.456.789-09",
        "gross_salary": salary,
        "hours_per_day": "8",
        "days_per_week": 5,
        "work_days_in_month": 22
    })
}

async fn calculate(router: Router, employee: Value) -> (StatusCode, Value) {
    post(
        router,
        "/calculate",
        json!({ "employee": employee, "reference_month": "2024-06" }),
    )
    .await
}

// =============================================================================
// Reference Payslips
// =============================================================================

#[tokio::test]
async fn test_minimum_wage_no_extras() {
    let (status, result) = calculate(create_router_for_test(), create_employee("emp_001", "1412.00")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&result, "/earnings/gross_total"), decimal("1412.00"));
    assert_eq!(field(&result, "/deductions/inss/discount"), decimal("105.90"));
    assert_eq!(field(&result, "/deductions/irrf/discount"), decimal("0"));
    assert_eq!(field(&result, "/net_salary"), decimal("1306.10"));
    assert_eq!(field(&result, "/fgts"), decimal("112.96"));
    assert_eq!(field(&result, "/base/monthly_hours"), decimal("176"));
}

#[tokio::test]
async fn test_hazardous_role() {
    let mut employee = create_employee("emp_002", "2000.00");
    employee["is_dangerous"] = json!(true);

    let (status, result) = calculate(create_router_for_test(), employee).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&result, "/earnings/dangerous_bonus"), decimal("600.00"));
    assert_eq!(field(&result, "/earnings/gross_total"), decimal("2600.00"));
    assert_eq!(field(&result, "/deductions/inss/discount"), decimal("212.82"));
    assert_eq!(field(&result, "/deductions/inss/effective_rate"), decimal("0.0819"));
    assert_eq!(field(&result, "/deductions/irrf/calculation_base"), decimal("2387.18"));
    assert_eq!(field(&result, "/deductions/irrf/discount"), decimal("9.60"));
    assert_eq!(field(&result, "/net_salary"), decimal("2377.58"));
    assert_eq!(field(&result, "/fgts"), decimal("208.00"));
}

#[tokio::test]
async fn test_high_unhealthy_exposure() {
    let mut employee = create_employee("emp_003", "2000.00");
    employee["unhealthy_level"] = json!("high");

    let (status, result) = calculate(create_router_for_test(), employee).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&result, "/earnings/unhealthy_bonus"), decimal("564.80"));
    assert_eq!(field(&result, "/deductions/inss/discount"), decimal("209.65"));
    assert_eq!(field(&result, "/deductions/irrf/discount"), decimal("7.20"));
    assert_eq!(field(&result, "/net_salary"), decimal("2347.95"));
}

#[tokio::test]
async fn test_portuguese_unhealthy_level() {
    let mut employee = create_employee("emp_003", "2000.00");
    employee["unhealthy_level"] = json!("alto");

    let (status, result) = calculate(create_router_for_test(), employee).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&result, "/earnings/unhealthy_bonus"), decimal("564.80"));
}

#[tokio::test]
async fn test_unhealthy_level_spellings() {
    for level in ["médio", "MEDIUM", "Medio"] {
        let mut employee = create_employee("emp_003", "2000.00");
        employee["unhealthy_level"] = json!(level);

        let (status, result) = calculate(create_router_for_test(), employee).await;

        assert_eq!(status, StatusCode::OK, "level {}", level);
        assert_eq!(field(&result, "/earnings/unhealthy_bonus"), decimal("282.40"));
    }
}

#[tokio::test]
async fn test_transport_voucher_cap() {
    let mut employee = create_employee("emp_004", "1000.00");
    employee["transport_voucher_value"] = json!("500.00");

    let (status, result) = calculate(create_router_for_test(), employee).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&result, "/earnings/transport_voucher"), decimal("500.00"));
    assert_eq!(
        field(&result, "/deductions/transport_voucher_discount"),
        decimal("60.00")
    );
    assert_eq!(field(&result, "/deductions/inss/discount"), decimal("75.00"));
    assert_eq!(field(&result, "/net_salary"), decimal("865.00"));
}

#[tokio::test]
async fn test_dependents_and_alimony() {
    let mut employee = create_employee("emp_005", "5000.00");
    employee["dependents"] = json!(2);
    employee["pension_alimony"] = json!("100.00");

    let (status, result) = calculate(create_router_for_test(), employee).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&result, "/deductions/inss/discount"), decimal("518.82"));
    assert_eq!(
        field(&result, "/deductions/irrf/dependent_deductions"),
        decimal("379.18")
    );
    assert_eq!(
        field(&result, "/deductions/irrf/calculation_base"),
        decimal("4002.00")
    );
    assert_eq!(field(&result, "/deductions/irrf/bracket_rate"), decimal("0.225"));
    assert_eq!(field(&result, "/deductions/irrf/discount"), decimal("237.68"));
}

#[tokio::test]
async fn test_benefits_and_overtime() {
    let mut employee = create_employee("emp_006", "2200.00");
    employee["meal_voucher_daily"] = json!("30.00");
    employee["benefit_plans"] = json!([
        { "kind": "health", "monthly_value": "150.00" },
        { "kind": "dental", "monthly_value": "40.00" }
    ]);
    employee["overtime"] = json!({ "hours": "10", "compensation": "paid" });

    let (status, result) = calculate(create_router_for_test(), employee).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&result, "/earnings/meal_voucher"), decimal("660.00"));
    assert_eq!(field(&result, "/earnings/overtime_value"), decimal("187.50"));
    assert_eq!(field(&result, "/earnings/gross_total"), decimal("2387.50"));
    assert_eq!(field(&result, "/deductions/health_plan_discount"), decimal("150.00"));
    assert_eq!(field(&result, "/deductions/dental_plan_discount"), decimal("40.00"));

    let gross = field(&result, "/earnings/gross_total");
    let total = field(&result, "/deductions/total");
    assert_eq!(field(&result, "/net_salary"), gross - total);
}

#[tokio::test]
async fn test_time_bank_overtime() {
    let mut employee = create_employee("emp_007", "2200.00");
    employee["overtime"] = json!({ "hours": "6", "compensation": "time_bank" });

    let (status, result) = calculate(create_router_for_test(), employee).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&result, "/earnings/overtime_value"), decimal("0"));
    assert_eq!(field(&result, "/earnings/banked_overtime_hours"), decimal("6"));
    assert_eq!(field(&result, "/earnings/gross_total"), decimal("2200.00"));
}

#[tokio::test]
async fn test_audit_trace_is_returned() {
    let (_, result) = calculate(create_router_for_test(), create_employee("emp_001", "3000.00")).await;

    let steps = result["audit_trace"]["steps"].as_array().unwrap();
    assert_eq!(steps.first().unwrap()["rule_id"], "base_pay");
    assert_eq!(steps.last().unwrap()["rule_id"], "net_salary");
    assert!(steps.iter().any(|s| s["rule_id"] == "inss"));
    assert!(steps.iter().any(|s| s["rule_id"] == "irrf"));
    assert!(steps.iter().all(|s| s["legal_ref"].as_str().is_some()));
}

#[tokio::test]
async fn test_negative_net_salary_warning() {
    let mut employee = create_employee("emp_008", "1412.00");
    employee["benefit_plans"] = json!([{ "kind": "health", "monthly_value": "2000.00" }]);

    let (status, result) = calculate(create_router_for_test(), employee).await;

    assert_eq!(status, StatusCode::OK);
    assert!(field(&result, "/net_salary") < Decimal::ZERO);
    let warnings = result["audit_trace"]["warnings"].as_array().unwrap();
    assert!(warnings.iter().any(|w| w["code"] == "NEGATIVE_NET_SALARY"));
}

// =============================================================================
// Premium Policy
// =============================================================================

#[tokio::test]
async fn test_greater_of_policy() {
    let loader = ConfigLoader::load("./config/br2024").expect("Failed to load config");
    let config = loader.into_config().with_premium_policy(PremiumPolicy::GreaterOf);
    let router = create_router(AppState::in_memory(config));

    let mut employee = create_employee("emp_009", "2000.00");
    employee["is_dangerous"] = json!(true);
    employee["unhealthy_level"] = json!("medium");

    let (status, result) = calculate(router, employee).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&result, "/earnings/dangerous_bonus"), decimal("600.00"));
    assert_eq!(field(&result, "/earnings/unhealthy_bonus"), decimal("0"));
    assert_eq!(field(&result, "/earnings/gross_total"), decimal("2600.00"));
}

#[tokio::test]
async fn test_additive_policy_is_default() {
    let mut employee = create_employee("emp_009", "2000.00");
    employee["is_dangerous"] = json!(true);
    employee["unhealthy_level"] = json!("medium");

    let (_, result) = calculate(create_router_for_test(), employee).await;

    assert_eq!(field(&result, "/earnings/gross_total"), decimal("2882.40"));
}

// =============================================================================
// Employee Registry and Payroll Runs
// =============================================================================

#[tokio::test]
async fn test_register_and_run_payroll() {
    let router = create_router_for_test();

    let (status, _) = post(router.clone(), "/employees", create_employee("emp_001", "1412.00")).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, record) = post(
        router.clone(),
        "/employees/emp_001/payrolls",
        json!({ "reference_month": "2024-06", "created_by": "hr_admin" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["employee_id"], "emp_001");
    assert_eq!(record["created_by"], "hr_admin");
    assert_eq!(field(&record, "/net_salary"), decimal("1306.10"));

    let (status, list) = get(router, "/employees/emp_001/payrolls").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_payroll_run_is_idempotent() {
    let router = create_router_for_test();
    post(router.clone(), "/employees", create_employee("emp_001", "3000.00")).await;

    let run = json!({ "reference_month": "2024-06" });
    let (_, first) = post(router.clone(), "/employees/emp_001/payrolls", run.clone()).await;
    let (_, second) = post(router.clone(), "/employees/emp_001/payrolls", run).await;

    assert_eq!(first["calculation_id"], second["calculation_id"]);
    assert_eq!(first["created_at"], second["created_at"]);

    let (_, all) = get(router, "/payrolls").await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_payroll_run_for_unknown_employee_returns_404() {
    let (status, error) = post(
        create_router_for_test(),
        "/employees/emp_404/payrolls",
        json!({ "reference_month": "2024-06" }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "EMPLOYEE_NOT_FOUND");
}

#[tokio::test]
async fn test_register_invalid_employee_returns_400() {
    let mut employee = create_employee("emp_001", "1412.00");
    employee["gross_salary"] = json!("-10.00");

    let (status, error) = post(create_router_for_test(), "/employees", employee).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_EMPLOYEE");
}

// =============================================================================
// Payroll Queries
// =============================================================================

async fn create_router_with_history() -> Router {
    let router = create_router_for_test();
    for (id, salary) in [("emp_001", "1412.00"), ("emp_002", "5000.00"), ("emp_003", "0.00")] {
        post(router.clone(), "/employees", create_employee(id, salary)).await;
    }
    for (id, month) in [
        ("emp_001", "2024-06"),
        ("emp_001", "2024-07"),
        ("emp_002", "2024-06"),
        ("emp_003", "2024-06"),
    ] {
        let (status, _) = post(
            router.clone(),
            &format!("/employees/{}/payrolls", id),
            json!({ "reference_month": month }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
    router
}

#[tokio::test]
async fn test_filter_by_net_salary_range() {
    let router = create_router_with_history().await;

    let (status, result) = get(router.clone(), "/payrolls?min_net=1000&max_net=2000").await;
    assert_eq!(status, StatusCode::OK);
    let records = result.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r["employee_id"] == "emp_001"));

    let (_, result) = get(router, "/payrolls?min_net=3000").await;
    let records = result.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["employee_id"], "emp_002");
}

#[tokio::test]
async fn test_group_by_month() {
    let router = create_router_with_history().await;
    let (status, groups) = get(router, "/payrolls/by-month").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(groups["2024-06"].as_array().unwrap().len(), 3);
    assert_eq!(groups["2024-07"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_total_deductions_exclude_fgts() {
    let router = create_router_with_history().await;
    let (status, result) = get(router, "/employees/emp_001/deductions").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["employee_id"], "emp_001");
    assert_eq!(field(&result, "/total_deductions"), decimal("211.80"));
}

#[tokio::test]
async fn test_edge_case_payrolls() {
    let router = create_router_with_history().await;
    let (status, result) = get(router, "/payrolls/edge-cases").await;

    assert_eq!(status, StatusCode::OK);
    let records = result.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["employee_id"], "emp_003");
}

// =============================================================================
// Error Cases
// =============================================================================

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/calculate")
        .header("Content-Type", "application/json")
        .body(Body::from("{invalid json"))
        .unwrap();
    let (status, error) = send(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_field_returns_400() {
    let mut employee = create_employee("emp_001", "1412.00");
    employee.as_object_mut().unwrap().remove("gross_salary");

    let (status, error) = calculate(create_router_for_test(), employee).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert!(error["message"].as_str().unwrap().contains("gross_salary"));
}

#[tokio::test]
async fn test_unknown_unhealthy_level_returns_400() {
    let mut employee = create_employee("emp_001", "1412.00");
    employee["unhealthy_level"] = json!("extreme");

    let (status, error) = calculate(create_router_for_test(), employee).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_degenerate_schedule_returns_400() {
    let mut employee = create_employee("emp_001", "1412.00");
    employee["work_days_in_month"] = json!(0);

    let (status, error) = calculate(create_router_for_test(), employee).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "DEGENERATE_SCHEDULE");
}

#[tokio::test]
async fn test_oversized_salary_returns_400() {
    let mut employee = create_employee("emp_001", "70000000000000000000000000000");
    employee["is_dangerous"] = json!(true);

    let (status, error) = calculate(create_router_for_test(), employee).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_EMPLOYEE");
}

#[tokio::test]
async fn test_excessive_overtime_returns_400() {
    let mut employee = create_employee("emp_001", "2200.00");
    employee["overtime"] = json!({ "hours": "1000000000000000000000000000", "compensation": "paid" });

    let (status, error) = calculate(create_router_for_test(), employee).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_EMPLOYEE");
}

#[tokio::test]
async fn test_missing_content_type_returns_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/calculate")
        .body(Body::from("{}"))
        .unwrap();
    let (status, error) = send(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MISSING_CONTENT_TYPE");
}
