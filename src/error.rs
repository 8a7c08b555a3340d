//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Errors raised by the pricing and availability core.
///
/// Every operation validates its inputs before touching any state, so a
/// returned error always means nothing was mutated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    /// Malformed input: negative price, out-of-range travelers, inverted ranges.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A record the caller required does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl BookingError {
    pub fn validation(message: impl Into<String>) -> Self {
        BookingError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        BookingError::NotFound(message.into())
    }
}

/// Result alias for core operations
pub type BookingResult<T> = std::result::Result<T, BookingError>;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Booking(#[from] BookingError),
}

/// JSON body returned for every failed request
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::Booking(BookingError::Validation(msg)) => {
                tracing::warn!("Rejected request: {}", msg);
                (StatusCode::BAD_REQUEST, "validation_error", msg.clone())
            }
            AppError::Booking(BookingError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "not_found", msg.clone())
            }
        };

        let body = ErrorResponse {
            error_type: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
