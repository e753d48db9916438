use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Message prefixes shared by the resource services so that every resource
/// type reports the same lifecycle failures the same way.
pub const RESOURCE_NOT_FOUND_FOR_ID: &str = "Could not retrieve resource with id = ";
pub const RESOURCE_COULD_NOT_BE_UPDATED: &str = "Resource could not be updated: ";
pub const RESOURCE_COULD_NOT_BE_DELETED: &str = "There is no resource to be deleted with id = ";
pub const SAVE_CONSTRAINT_VIOLATION: &str =
    "Could not save resource because of unique constraint violation.";
pub const UPDATE_CONSTRAINT_VIOLATION: &str =
    "Could not update resource because of unique constraint violation.";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not updated: {0}")]
    NotUpdated(String),

    #[error("Not deleted: {0}")]
    NotDeleted(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

impl AppError {
    /// Not-found error for a missing row of any resource type.
    pub fn not_found_for_id(id: i64) -> Self {
        Self::NotFound(format!("{RESOURCE_NOT_FOUND_FOR_ID}{id}"))
    }

    /// Not-updated error wrapping the underlying not-found message.
    pub fn not_updated(cause: &Self) -> Self {
        let detail = match cause {
            Self::NotFound(msg) => msg.clone(),
            other => other.to_string(),
        };
        Self::NotUpdated(format!("{RESOURCE_COULD_NOT_BE_UPDATED}{detail}"))
    }

    pub fn not_deleted(id: i64) -> Self {
        Self::NotDeleted(format!("{RESOURCE_COULD_NOT_BE_DELETED}{id}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::Database(e) => {
                tracing::error!("Database error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            Self::Config(e) => {
                tracing::error!("Config error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
            Self::NotFound(msg) | Self::NotUpdated(msg) | Self::NotDeleted(msg) => {
                (StatusCode::NOT_FOUND, msg.clone())
            }
            Self::ConstraintViolation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
