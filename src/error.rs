use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::classes::CatalogError;
use crate::schedule::ScheduleError;

#[derive(Debug)]
pub enum ApiError {
    Unauthorized(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg).into_response(),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg).into_response(),
        }
    }
}

impl From<ScheduleError> for ApiError {
    fn from(value: ScheduleError) -> Self {
        match value {
            ScheduleError::InvalidDay(_) | ScheduleError::InvalidInterval { .. } => {
                ApiError::BadRequest(value.to_string())
            }
            ScheduleError::TimeConflict { .. } => ApiError::Conflict(value.to_string()),
            ScheduleError::NotFound(_) => ApiError::NotFound(value.to_string()),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(value: CatalogError) -> Self {
        match value {
            CatalogError::NotFound(_) => ApiError::NotFound(value.to_string()),
        }
    }
}
