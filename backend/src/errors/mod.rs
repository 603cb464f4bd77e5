//! Global application error types and handlers.
//!
//! This module defines the error type returned by every handler and service in
//! the backend and turns it into a consistent JSON response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use expensesms_adapters::AdapterError;

use crate::auth::AuthError;
use crate::database::StorageError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("settings required for account {0}")]
    SettingsRequired(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("upstream error: {0}")]
    Upstream(#[from] AdapterError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Request timed out")]
    Timeout,

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::SettingsRequired(_) => StatusCode::CONFLICT,
            AppError::Auth(e) => e.status_code(),
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Timeout => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::Storage(_) | AppError::Internal(_) => {
                error!(error = %self, "500 Server Error");
                "Internal Server Error".to_string()
            }
            AppError::Upstream(_) => {
                error!(error = %self, "upstream request failed");
                "Bad Gateway".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
