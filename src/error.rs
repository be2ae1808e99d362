use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::dto::{ErrorResponse, FieldError, ValidationErrorResponse};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("database has been shut down")]
    Closed,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("note not found")]
    NotFound,

    #[error("request validation failed ({} errors)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("request body exceeds the configured limit")]
    PayloadTooLarge,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    detail: "Note not found".to_string(),
                }),
            )
                .into_response(),
            Self::Validation(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationErrorResponse { detail }),
            )
                .into_response(),
            Self::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(ErrorResponse {
                    detail: "Request body too large".to_string(),
                }),
            )
                .into_response(),
            Self::Store(e) => {
                tracing::error!("note store failure: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        detail: "Internal Server Error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
