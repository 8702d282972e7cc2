//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;
use thiserror::Error;

use churn_core::ChurnError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Profile rejected by the encoder
    #[error(transparent)]
    InvalidProfile(ChurnError),

    /// Schema and artifact out of sync
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Server started without an artifact
    #[error("Model not loaded")]
    ModelUnavailable,
}

impl From<ChurnError> for AppError {
    fn from(err: ChurnError) -> Self {
        match err {
            ChurnError::NotLoaded => AppError::ModelUnavailable,
            err if err.is_caller_error() => AppError::InvalidProfile(err),
            err => AppError::Configuration(err.to_string()),
        }
    }
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::InvalidProfile(ChurnError::UnknownAttribute { .. }) => "unknown_attribute",
            AppError::InvalidProfile(ChurnError::MissingAttribute { .. }) => "missing_attribute",
            AppError::InvalidProfile(ChurnError::UnknownLabel { .. }) => "unknown_label",
            AppError::InvalidProfile(ChurnError::DomainViolation { .. }) => "domain_violation",
            AppError::InvalidProfile(_) => "invalid_profile",
            AppError::Configuration(_) => "artifact_mismatch",
            AppError::ModelUnavailable => "model_unavailable",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::InvalidProfile(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
            AppError::Configuration(msg) => {
                tracing::error!("Artifact mismatch: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Model artifact does not match the feature schema".to_string())
            }
            AppError::ModelUnavailable => (StatusCode::SERVICE_UNAVAILABLE, self.to_string()),
        };

        let body = Json(json!({
            "error": error_message,
            "code": self.code(),
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}
