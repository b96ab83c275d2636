use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use munifin_core::{
    dashboard::{DashboardOverview, DepartmentStatusReport},
    utils::today,
};

use crate::{
    error::ApiResult,
    extract::ApiQuery,
    main_lib::AppState,
    models::{AsOfQuery, StatusQuery},
};

/// Per-department failures are reported inside the overview; the request
/// itself only fails when the department registry cannot be read.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/overview",
    params(AsOfQuery),
    responses((status = 200, description = "Overview of every department"))
)]
pub(super) async fn get_overview(
    ApiQuery(query): ApiQuery<AsOfQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DashboardOverview>> {
    let as_of = query.as_of.unwrap_or_else(today);
    let key = AppState::overview_cache_key(as_of);
    if let Some(cached) = state.overview_cache.get(&key) {
        return Ok(Json(cached));
    }

    let overview = state.dashboard_service.overview_as_of(as_of).await?;
    state.overview_cache.insert(key, overview.clone());
    Ok(Json(overview))
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/status",
    params(StatusQuery),
    responses(
        (status = 200, description = "Department budget status at the close of a fiscal quarter"),
        (status = 400, body = crate::models::ErrorResponse)
    )
)]
pub(super) async fn get_department_status(
    ApiQuery(query): ApiQuery<StatusQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DepartmentStatusReport>> {
    let report = state
        .dashboard_service
        .department_status(query.fiscal_year, query.quarter)
        .await?;
    Ok(Json(report))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard/overview", get(get_overview))
        .route("/dashboard/status", get(get_department_status))
}
