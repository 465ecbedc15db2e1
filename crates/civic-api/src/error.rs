use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::ApiResponse;

/// Errors surfaced by the admin auth endpoints. The text sent to the client
/// is fixed per variant; details only reach the logs.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(detail) => {
                tracing::warn!("Bad request: {}", detail);
                (StatusCode::BAD_REQUEST, "Invalid request")
            }
            ApiError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            ApiError::Unauthorized(detail) => {
                tracing::debug!("Unauthorized: {}", detail);
                (StatusCode::UNAUTHORIZED, "Unauthorized")
            }
            ApiError::InternalError(detail) => {
                tracing::error!("Internal error: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, Json(ApiResponse::error(message))).into_response()
    }
}
