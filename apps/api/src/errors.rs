use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::lifecycle::LifecycleError;
use crate::store::{SpendLogError, StoreError};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every failure is rendered as `{"error": "<message>"}`; callers get the
/// failure reason verbatim and no structured code.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(StoreError),

    #[error(transparent)]
    SpendLog(#[from] SpendLogError),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { .. } => AppError::NotFound(e.to_string()),
            other => AppError::Store(other),
        }
    }
}

impl From<LifecycleError> for AppError {
    fn from(e: LifecycleError) -> Self {
        match e {
            LifecycleError::Validation(msg) => AppError::Validation(msg),
            LifecycleError::Store(e) => e.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Store(e) => {
                tracing::error!("Store error: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::SpendLog(e) => {
                tracing::error!("Spend log error: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = match &self {
            AppError::NotFound(msg) | AppError::Validation(msg) => msg.clone(),
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
