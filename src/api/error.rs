//! Error responses for the HTTP API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::error::ExpenseError;

use super::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal server error: {message}")]
    InternalError { message: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ExpenseError> for ApiError {
    fn from(err: ExpenseError) -> Self {
        if err.is_not_found() {
            Self::NotFound {
                resource: err.to_string(),
            }
        } else if err.is_validation() || matches!(err, ExpenseError::Duplicate { .. }) {
            Self::BadRequest {
                message: err.to_string(),
            }
        } else {
            log::error!("Request failed: {}", err);
            Self::InternalError {
                message: err.to_string(),
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::BadRequest { message } | Self::InternalError { message } => message,
            Self::NotFound { resource } => resource,
        };
        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DateParseError;

    #[test]
    fn test_status_mapping() {
        let err: ApiError = ExpenseError::from(DateParseError::Empty).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err: ApiError = ExpenseError::category_not_found("Food").into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err: ApiError = ExpenseError::duplicate_category("Food").into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err: ApiError = ExpenseError::Storage("lock poisoned".into()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
