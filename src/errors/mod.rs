use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

/// Outcomes a caller has to tell apart. Plumbing failures stay `anyhow`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("authentication required")]
    Unauthorized,

    #[error("access denied: {0}")]
    Forbidden(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("transfer window is closed")]
    TransfersClosed,

    #[error("invalid formation {0}")]
    InvalidFormation(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::TransfersClosed => StatusCode::CONFLICT,
            AppError::InvalidFormation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("Request failed: {:?}", self);
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
