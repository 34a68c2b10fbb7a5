//! Error types for the call orchestrator API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Flow not found for number: {0}")]
    FlowNotFound(String),

    #[error("Invalid phone number: {0}")]
    InvalidPhoneNumber(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Platform error: {0}")]
    Platform(#[from] crate::client::TelephonyError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<voxline_core::VoxlineError> for Error {
    fn from(err: voxline_core::VoxlineError) -> Self {
        match err {
            voxline_core::VoxlineError::Validation(msg) => Error::InvalidDocument(msg),
            other => Error::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::FlowNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            Error::InvalidPhoneNumber(_)
            | Error::InvalidRequest(_)
            | Error::InvalidDocument(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Error::Platform(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
            Error::Internal(_) => {
                tracing::error!("Internal error: {:?}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}
