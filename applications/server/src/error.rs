/// Server error types
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use shelf_core::ShelfError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

/// Message returned for transient storage failures
pub const TRANSIENT_MESSAGE: &str = "Temporary storage failure, please try again";

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Shelf(#[from] ShelfError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ServerError {
    fn from(rejection: QueryRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ServerError {
    fn from(rejection: PathRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

impl ServerError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ServerError::Shelf(err) => match err {
                ShelfError::Validation { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
                ShelfError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                ShelfError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
                ShelfError::Referential(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
                ShelfError::Database(msg) => {
                    tracing::error!("Database error: {}", msg);
                    (StatusCode::SERVICE_UNAVAILABLE, TRANSIENT_MESSAGE.to_string())
                }
                ShelfError::Storage(msg) => {
                    tracing::error!("Storage error: {}", msg);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                    )
                }
            },
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServerError::Config(msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.status_and_message();

        let body = Json(json!({
            "success": false,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
