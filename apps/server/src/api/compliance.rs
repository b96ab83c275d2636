use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use munifin_core::compliance::{ComplianceItem, NewComplianceItem};

use crate::{error::ApiResult, extract::ApiJson, main_lib::AppState};

#[utoipa::path(get, path = "/api/v1/compliance", responses((status = 200, description = "Obligations due in the next three months")))]
pub(super) async fn list_upcoming(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ComplianceItem>>> {
    let items = state.compliance_service.get_upcoming()?;
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/api/v1/compliance",
    responses(
        (status = 200, description = "Created obligation"),
        (status = 400, body = crate::models::ErrorResponse),
        (status = 404, body = crate::models::ErrorResponse)
    )
)]
pub(super) async fn create_item(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<NewComplianceItem>,
) -> ApiResult<Json<ComplianceItem>> {
    let item = state.compliance_service.create_item(payload).await?;
    Ok(Json(item))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/compliance", get(list_upcoming).post(create_item))
}
