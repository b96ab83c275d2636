use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

use munifin_core::forecast::{Forecast, ForecastError, ForecastInput, ForecastProvider, RiskLevel};
use munifin_server::{api::app_router, build_state_with_forecaster, config::Config};

/// Projects 110% of the budget for every department except the listed ones.
struct StubForecaster {
    failing: Vec<String>,
    calls: AtomicUsize,
}

impl StubForecaster {
    fn failing_for(ids: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            failing: ids.iter().map(|s| s.to_string()).collect(),
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl ForecastProvider for StubForecaster {
    fn id(&self) -> &'static str {
        "STUB"
    }

    async fn predict(&self, input: &ForecastInput) -> Result<Forecast, ForecastError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(&input.department_id) {
            return Err(ForecastError::Provider("model offline".to_string()));
        }
        Ok(Forecast {
            end_of_year_projection: input.budget * rust_decimal_macros::dec!(1.1),
            risk_level: RiskLevel::High,
            contributing_factors: vec!["stub".to_string()],
        })
    }
}

struct TestApp {
    _dir: TempDir,
    router: Router,
}

async fn build_app(forecaster: Arc<StubForecaster>) -> TestApp {
    let dir = tempdir().unwrap();
    let config = Config {
        db_path: dir.path().join("test.db").to_string_lossy().into_owned(),
        ..Config::default()
    };
    let state = build_state_with_forecaster(&config, forecaster)
        .await
        .unwrap();
    TestApp {
        _dir: dir,
        router: app_router(state, &config),
    }
}

async fn send(app: &TestApp, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, value)
}

async fn create_department(app: &TestApp, id: &str, code: &str, budget: i64) {
    let (status, _) = send(
        app,
        Method::POST,
        "/api/v1/departments",
        Some(json!({
            "id": id,
            "name": format!("{} department", id),
            "budgetCode": code,
            "fiscalYear": 2025,
            "budget": budget,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

async fn record(app: &TestApp, id: &str, amount: i64, occurred_at: &str) {
    let (status, _) = send(
        app,
        Method::POST,
        &format!("/api/v1/departments/{}/transactions", id),
        Some(json!({
            "amount": amount,
            "category": "OPERATIONS",
            "occurredAt": occurred_at,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn healthz_and_openapi_are_served() {
    let app = build_app(StubForecaster::failing_for(&[])).await;

    let (status, body) = send(&app, Method::GET, "/api/v1/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".to_string()));

    let (status, doc) = send(&app, Method::GET, "/api/v1/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/v1/departments/{id}/budget"].is_object());
}

#[tokio::test]
async fn budget_update_round_trip() {
    let app = build_app(StubForecaster::failing_for(&[])).await;
    create_department(&app, "parks", "PRK-100", 1_000_000).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/v1/departments/parks/budget",
        Some(json!({ "amount": 1250000.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["budget"].as_f64(), Some(1250000.5));

    let (_, fetched) = send(&app, Method::GET, "/api/v1/departments/parks", None).await;
    assert_eq!(fetched["budget"].as_f64(), Some(1250000.5));
}

#[tokio::test]
async fn negative_budget_is_rejected() {
    let app = build_app(StubForecaster::failing_for(&[])).await;
    create_department(&app, "parks", "PRK-100", 1_000_000).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/v1/departments/parks/budget",
        Some(json!({ "amount": -5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!(400));
    assert!(body["error"].is_string());

    let (_, fetched) = send(&app, Method::GET, "/api/v1/departments/parks", None).await;
    assert_eq!(fetched["budget"].as_f64(), Some(1000000.0));
}

#[tokio::test]
async fn unknown_department_is_404() {
    let app = build_app(StubForecaster::failing_for(&[])).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/v1/departments/ghost/budget",
        Some(json!({ "amount": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!(404));

    let (status, _) = send(&app, Method::GET, "/api/v1/departments/ghost/spending", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_budget_code_conflicts() {
    let app = build_app(StubForecaster::failing_for(&[])).await;
    create_department(&app, "parks", "PRK-100", 1_000_000).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/departments",
        Some(json!({
            "id": "parks-2",
            "name": "Parks again",
            "budgetCode": "PRK-100",
            "fiscalYear": 2025,
            "budget": 5,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], json!(409));
}

#[tokio::test]
async fn spending_report_reflects_new_transactions() {
    let forecaster = StubForecaster::failing_for(&[]);
    let app = build_app(forecaster.clone()).await;
    create_department(&app, "parks", "PRK-100", 1_000_000).await;
    record(&app, "parks", 400_000, "2025-03-01T10:00:00").await;

    let uri = "/api/v1/departments/parks/spending?asOf=2025-06-30";
    let (status, report) = send(&app, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["currentSpending"].as_f64(), Some(400000.0));
    assert_eq!(report["forecastStatus"], json!("AVAILABLE"));
    assert_eq!(report["alerts"][0]["severity"], json!("HIGH"));

    // Served from cache until a mutation invalidates it.
    send(&app, Method::GET, uri, None).await;
    assert_eq!(forecaster.calls.load(Ordering::SeqCst), 1);

    record(&app, "parks", 100_000, "2025-04-01T10:00:00").await;
    let (_, report) = send(&app, Method::GET, uri, None).await;
    assert_eq!(report["currentSpending"].as_f64(), Some(500000.0));
    assert_eq!(forecaster.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn dashboard_isolates_forecast_failures() {
    let app = build_app(StubForecaster::failing_for(&["roads"])).await;
    create_department(&app, "parks", "PRK-100", 1_000_000).await;
    create_department(&app, "roads", "RD-1", 2_000_000).await;
    record(&app, "parks", 250_000, "2025-02-01T09:00:00").await;
    record(&app, "roads", 900_000, "2025-02-01T09:00:00").await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/dashboard/overview?asOf=2025-06-30",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let items = body["overview"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    let status_of = |id: &str| {
        items
            .iter()
            .find(|i| i["department"]["id"] == json!(id))
            .map(|i| i["spending"]["forecastStatus"].clone())
            .unwrap()
    };
    assert_eq!(status_of("parks"), json!("AVAILABLE"));
    assert_eq!(status_of("roads"), json!("FORECAST_UNAVAILABLE"));
    let item_of = |id: &str| items.iter().find(|i| i["department"]["id"] == json!(id)).unwrap();
    assert!(item_of("roads")["forecastError"].is_string());
    assert!(item_of("parks").get("forecastError").is_none());

    let metrics = &body["summaryMetrics"];
    assert_eq!(metrics["departmentCount"], json!(2));
    assert_eq!(metrics["forecastUnavailable"], json!(1));
    assert_eq!(metrics["totalSpent"].as_f64(), Some(1150000.0));
}

#[tokio::test]
async fn compliance_items_are_listed_within_window() {
    let app = build_app(StubForecaster::failing_for(&[])).await;
    let soon = (munifin_core::utils::today() + chrono::Duration::days(10)).to_string();
    let later = (munifin_core::utils::today() + chrono::Duration::days(200)).to_string();

    for (title, due) in [("Single audit", &soon), ("Annual report", &later)] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/compliance",
            Some(json!({ "title": title, "dueDate": due, "itemType": "AUDIT" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&app, Method::GET, "/api/v1/compliance", None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Single audit"]);
}

#[tokio::test]
async fn malformed_budget_body_is_a_json_400() {
    let app = build_app(StubForecaster::failing_for(&[])).await;
    create_department(&app, "parks", "PRK-100", 1_000_000).await;

    for body in [json!({ "amount": "abc" }), json!({})] {
        let (status, error) = send(
            &app,
            Method::PATCH,
            "/api/v1/departments/parks/budget",
            Some(body),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["code"], json!(400));
        assert!(error["error"].as_str().unwrap().starts_with("Invalid request body"));
    }

    let (_, fetched) = send(&app, Method::GET, "/api/v1/departments/parks", None).await;
    assert_eq!(fetched["budget"].as_f64(), Some(1000000.0));
}

#[tokio::test]
async fn malformed_transaction_and_compliance_bodies_are_json_400s() {
    let app = build_app(StubForecaster::failing_for(&[])).await;
    create_department(&app, "parks", "PRK-100", 1_000_000).await;

    let (status, error) = send(
        &app,
        Method::POST,
        "/api/v1/departments/parks/transactions",
        Some(json!({ "amount": 10, "category": "SNACKS" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], json!(400));

    let (status, error) = send(
        &app,
        Method::POST,
        "/api/v1/compliance",
        Some(json!({ "title": "Audit", "dueDate": "not-a-date", "itemType": "AUDIT" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], json!(400));
}

#[tokio::test]
async fn quarter_status_covers_requested_fiscal_year() {
    let app = build_app(StubForecaster::failing_for(&["roads"])).await;
    create_department(&app, "parks", "PRK-100", 1_000_000).await;
    create_department(&app, "roads", "RD-1", 2_000_000).await;
    record(&app, "parks", 250_000, "2025-02-01T09:00:00").await;
    record(&app, "parks", 300_000, "2025-05-01T09:00:00").await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/dashboard/status?fiscalYear=2025&quarter=1",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quarterEnd"], json!("2025-03-31"));

    let departments = body["departments"].as_array().unwrap();
    assert_eq!(departments.len(), 2);
    let parks = departments
        .iter()
        .find(|d| d["departmentId"] == json!("parks"))
        .unwrap();
    assert_eq!(parks["spent"].as_f64(), Some(250000.0));
    assert_eq!(parks["projected"].as_f64(), Some(1100000.0));
    assert_eq!(parks["alert"], json!(true));
    assert_eq!(parks["risk"], json!("HIGH"));
    let roads = departments
        .iter()
        .find(|d| d["departmentId"] == json!("roads"))
        .unwrap();
    assert_eq!(roads["forecastStatus"], json!("FORECAST_UNAVAILABLE"));
    assert_eq!(roads["alert"], json!(false));
    assert!(roads["forecastError"].is_string());
}

#[tokio::test]
async fn quarter_status_rejects_bad_parameters() {
    let app = build_app(StubForecaster::failing_for(&[])).await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/dashboard/status?fiscalYear=2025&quarter=7",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!(400));

    let (status, body) = send(&app, Method::GET, "/api/v1/dashboard/status?quarter=2", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!(400));
}
