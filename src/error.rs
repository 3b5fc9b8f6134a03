use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::forms::ValidationErrors;
use crate::templates::server_error_page;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Malformed request: {0}")]
    Malformed(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Malformed(rejection.body_text())
    }
}

/// An id that does not parse cannot name a row.
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::NotFound(rejection.body_text())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidReference(_) | Self::Malformed(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            Self::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                "Database error occurred"
            }
            Self::Validation(ref errors) => {
                tracing::debug!("Validation failed: {}", errors);
                "Validation failed"
            }
            Self::InvalidReference(ref msg) => {
                tracing::warn!("Invalid reference: {}", msg);
                msg.as_str()
            }
            Self::NotFound(ref msg) => msg.as_str(),
            Self::Malformed(ref msg) => {
                tracing::debug!("Malformed request: {}", msg);
                "Malformed request body"
            }
        };

        let body = match self {
            Self::Validation(ref errors) => json!({
                "error": error_message,
                "details": self.to_string(),
                "fields": errors,
            }),
            _ => json!({
                "error": error_message,
                "details": self.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

/// Error returned by HTML handlers: logs the cause and renders the 500 page.
#[derive(Debug)]
pub struct PageError(pub AppError);

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<sea_orm::DbErr> for PageError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        tracing::error!("Page rendering failed: {}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(server_error_page().into_string()),
        )
            .into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
pub type PageResult<T> = std::result::Result<T, PageError>;
