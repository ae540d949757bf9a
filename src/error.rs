use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use quire_core::ExportError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Book '{0}' not found")]
    BookNotFound(String),

    #[error("You do not have access to this book")]
    Forbidden,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Service overloaded, please try again later")]
    ServiceOverloaded,

    #[error("Export failed: {0}")]
    ExportFailed(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ExportError> for ServiceError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::NotFound(id) => ServiceError::BookNotFound(id.to_string()),
            ExportError::Forbidden { .. } => ServiceError::Forbidden,
            other => ServiceError::ExportFailed(other.to_string()),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::BookNotFound(_) => (StatusCode::NOT_FOUND, "BookNotFound", self.to_string()),
            Self::Forbidden => (StatusCode::FORBIDDEN, "Forbidden", self.to_string()),
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Unauthorized",
                "Invalid or missing bearer token".to_string(),
            ),
            Self::ServiceOverloaded => (
                StatusCode::SERVICE_UNAVAILABLE,
                "ServiceOverloaded",
                self.to_string(),
            ),
            Self::ExportFailed(_) | Self::Storage(_) | Self::Internal(_) => {
                tracing::error!("Internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "InternalError",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": code,
            "message": message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
