use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use munifin_core::errors::{DatabaseError, Error as CoreError};
use thiserror::Error;

use crate::models::ErrorResponse;

const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(format!("Invalid query string: {}", rejection.body_text()))
    }
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::Core(e) => match e {
                CoreError::NotFound(_) | CoreError::Database(DatabaseError::NotFound(_)) => {
                    (StatusCode::NOT_FOUND, e.public_message())
                }
                CoreError::Validation(_) => (StatusCode::BAD_REQUEST, e.to_string()),
                CoreError::Database(DatabaseError::UniqueViolation(_)) => (
                    StatusCode::CONFLICT,
                    "A record with the same key already exists".to_string(),
                ),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string()),
            },
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_message();
        if status.is_server_error() {
            // Detail goes to the log only.
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected with {}: {}", status, error);
        }
        let body = Json(ErrorResponse {
            code: status.as_u16(),
            error,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use munifin_core::errors::ValidationError;

    #[test]
    fn test_status_mapping() {
        let not_found = ApiError::from(CoreError::department_not_found("x"));
        assert_eq!(not_found.status_and_message().0, StatusCode::NOT_FOUND);

        let invalid = ApiError::from(CoreError::Validation(ValidationError::invalid("neg")));
        assert_eq!(invalid.status_and_message().0, StatusCode::BAD_REQUEST);

        let db = ApiError::from(CoreError::Database(DatabaseError::QueryFailed(
            "disk I/O error at /var/lib/db".to_string(),
        )));
        let (status, message) = db.status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Internal server error");

        let bad = ApiError::BadRequest("Invalid request body: missing field".to_string());
        assert_eq!(bad.status_and_message().0, StatusCode::BAD_REQUEST);
    }
}
