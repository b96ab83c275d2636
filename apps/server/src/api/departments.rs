use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, patch},
    Json, Router,
};
use munifin_core::{
    departments::{BudgetUpdate, Department, NewDepartment},
    monitor::SpendingReport,
    transactions::{DepartmentSpending, NewTransaction, Transaction},
    utils::today,
};

use crate::{
    error::ApiResult,
    extract::{ApiJson, ApiQuery},
    main_lib::AppState,
    models::{AsOfQuery, BudgetUpdateRequest},
};

#[utoipa::path(get, path = "/api/v1/departments", responses((status = 200, description = "All departments")))]
pub(super) async fn list_departments(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Department>>> {
    let departments = state.department_service.list_departments()?;
    Ok(Json(departments))
}

#[utoipa::path(
    post,
    path = "/api/v1/departments",
    responses(
        (status = 200, description = "Created department"),
        (status = 400, body = crate::models::ErrorResponse),
        (status = 409, body = crate::models::ErrorResponse)
    )
)]
pub(super) async fn create_department(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<NewDepartment>,
) -> ApiResult<Json<Department>> {
    let created = state.department_service.create_department(payload).await?;
    state.invalidate_caches();
    Ok(Json(created))
}

#[utoipa::path(
    get,
    path = "/api/v1/departments/{id}",
    params(("id" = String, Path, description = "Department id")),
    responses((status = 200, description = "Department"), (status = 404, body = crate::models::ErrorResponse))
)]
pub(super) async fn get_department(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Department>> {
    let department = state.department_service.get_department(&id)?;
    Ok(Json(department))
}

#[utoipa::path(
    patch,
    path = "/api/v1/departments/{id}/budget",
    params(("id" = String, Path, description = "Department id")),
    request_body = BudgetUpdateRequest,
    responses(
        (status = 200, description = "Updated department"),
        (status = 400, body = crate::models::ErrorResponse),
        (status = 404, body = crate::models::ErrorResponse)
    )
)]
pub(super) async fn update_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<BudgetUpdateRequest>,
) -> ApiResult<Json<Department>> {
    let update: BudgetUpdate = payload.into();
    let updated = state
        .department_service
        .update_budget(&id, update.amount)
        .await?;
    state.invalidate_caches();
    Ok(Json(updated))
}

#[utoipa::path(
    get,
    path = "/api/v1/departments/{id}/transactions",
    params(("id" = String, Path, description = "Department id")),
    responses((status = 200, description = "Current fiscal year spending"), (status = 404, body = crate::models::ErrorResponse))
)]
pub(super) async fn list_transactions(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DepartmentSpending>> {
    let spending = state.spending_service.get_department_spending(&id)?;
    Ok(Json(spending))
}

#[utoipa::path(
    post,
    path = "/api/v1/departments/{id}/transactions",
    params(("id" = String, Path, description = "Department id")),
    responses(
        (status = 200, description = "Recorded transaction"),
        (status = 400, body = crate::models::ErrorResponse),
        (status = 404, body = crate::models::ErrorResponse)
    )
)]
pub(super) async fn record_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<NewTransaction>,
) -> ApiResult<Json<Transaction>> {
    let recorded = state
        .spending_service
        .record_transaction(&id, payload)
        .await?;
    state.invalidate_caches();
    Ok(Json(recorded))
}

#[utoipa::path(
    get,
    path = "/api/v1/departments/{id}/spending",
    params(("id" = String, Path, description = "Department id"), AsOfQuery),
    responses((status = 200, description = "Spending report with forecast and alerts"), (status = 404, body = crate::models::ErrorResponse))
)]
pub(super) async fn get_spending_report(
    Path(id): Path<String>,
    ApiQuery(query): ApiQuery<AsOfQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<SpendingReport>> {
    let as_of = query.as_of.unwrap_or_else(today);
    let key = AppState::report_cache_key(&id, as_of);
    if let Some(cached) = state.report_cache.get(&key) {
        return Ok(Json(cached));
    }

    let report = state
        .monitor_service
        .track_spending_as_of(&id, as_of)
        .await?;
    state.report_cache.insert(key, report.clone());
    Ok(Json(report))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/departments",
            get(list_departments).post(create_department),
        )
        .route("/departments/{id}", get(get_department))
        .route("/departments/{id}/budget", patch(update_budget))
        .route(
            "/departments/{id}/transactions",
            get(list_transactions).post(record_transaction),
        )
        .route("/departments/{id}/spending", get(get_spending_report))
}
