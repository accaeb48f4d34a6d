//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

/// Failure to bring the alert file into memory.
///
/// Cloned out of the dataset cache on every access, so causes are kept as
/// strings rather than source errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("malformed CSV: {0}")]
    Parse(String),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("line {line}: invalid {column} value '{value}'")]
    InvalidValue {
        line: u64,
        column: String,
        value: String,
    },
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::Parse(err.to_string())
    }
}

#[derive(Debug)]
pub enum AppError {
    // Dataset errors
    DatasetUnavailable { file: String, details: String },

    // Validation errors
    ValidationError(String),

    // Generic errors
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::DatasetUnavailable { file, details } => {
                // Already logged once by the dataset store
                tracing::debug!("Dataset unavailable: {}", details);
                let status = StatusCode::SERVICE_UNAVAILABLE;
                (status, json!({
                    "error": format!("Dataset not found. Please ensure '{}' is in your project folder.", file),
                    "details": details,
                    "status": status.as_u16()
                }))
            }
            AppError::ValidationError(msg) => {
                tracing::warn!("Rejected request: {}", msg);
                let status = StatusCode::BAD_REQUEST;
                (status, json!({
                    "error": msg,
                    "status": status.as_u16()
                }))
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                (status, json!({
                    "error": "Internal server error",
                    "status": status.as_u16()
                }))
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_unavailable_is_503() {
        let err = AppError::DatasetUnavailable {
            file: "alerts.csv".to_string(),
            details: "cannot read alerts.csv: No such file or directory".to_string(),
        };
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_validation_error_is_400() {
        let err = AppError::ValidationError("limit: out of range".to_string());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_load_error_messages() {
        let err = LoadError::InvalidValue {
            line: 4,
            column: "timestamp".to_string(),
            value: "yesterday".to_string(),
        };
        assert_eq!(err.to_string(), "line 4: invalid timestamp value 'yesterday'");
        assert_eq!(
            LoadError::MissingColumn("hour".to_string()).to_string(),
            "missing required column 'hour'"
        );
    }
}
