//! Mapping of failures to HTTP responses.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::error::JobGuardError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Prediction failed: {0}")]
    Prediction(JobGuardError),
}

impl From<JobGuardError> for ApiError {
    fn from(err: JobGuardError) -> Self {
        match err {
            JobGuardError::EmptyInput(msg) | JobGuardError::InvalidInput(msg) => {
                ApiError::InvalidRequest(msg)
            }
            other => ApiError::Prediction(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Prediction(e) => {
                log::error!("Prediction failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Prediction failed".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::MLError;

    #[test]
    fn test_client_errors_become_bad_request() {
        let err = ApiError::from(JobGuardError::invalid_input("Please enter a job description."));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_model_errors_are_hidden() {
        let err = ApiError::from(JobGuardError::from(MLError::DimensionMismatch {
            expected: 3,
            actual: 2,
        }));
        assert!(matches!(err, ApiError::Prediction(_)));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
