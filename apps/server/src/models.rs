//! Request bodies and OpenAPI schemas owned by the HTTP layer.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use munifin_core::departments::BudgetUpdate;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUpdateRequest {
    #[schema(value_type = f64, example = 1250000.0)]
    pub amount: Decimal,
}

impl From<BudgetUpdateRequest> for BudgetUpdate {
    fn from(req: BudgetUpdateRequest) -> Self {
        BudgetUpdate { amount: req.amount }
    }
}

/// Optional evaluation date for derived reports; defaults to today.
#[derive(Deserialize, IntoParams, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AsOfQuery {
    pub as_of: Option<NaiveDate>,
}

/// Fiscal year and quarter (1-4) for the department status query.
#[derive(Deserialize, IntoParams, Debug, Clone)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StatusQuery {
    pub fiscal_year: i32,
    pub quarter: u32,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct ErrorResponse {
    pub code: u16,
    pub error: String,
}
