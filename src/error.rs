use axum::{Json, extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur in service layer operations.
///
/// The display strings are shown verbatim to the customer by the front end.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Credit card number or expiration date is missing.
    #[error("Please provide credit card information!")]
    MissingPaymentInfo,
    /// The requested seat is not part of the seat map.
    #[error("Seat `{0}` does not exist.")]
    SeatNotFound(String),
    /// The seat was already booked when the request arrived.
    #[error("This seat has already been booked!")]
    AlreadyBooked,
    /// Simulated backend failure; the same request may be retried.
    #[error("An unknown error has occurred. Please try your request again.")]
    Transient,
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input or conflicting with the current seat state.
    #[error("{0}")]
    BadRequest(String),
    /// Requested resource not found.
    #[error("{0}")]
    NotFound(String),
    /// Internal server error.
    #[error("{0}")]
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        let message = err.to_string();
        match err {
            ServiceError::MissingPaymentInfo | ServiceError::AlreadyBooked => {
                AppError::BadRequest(message)
            }
            ServiceError::SeatNotFound(_) => AppError::NotFound(message),
            ServiceError::Transient => AppError::Internal(message),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let payload = Json(ErrorBody {
            message: self.to_string(),
        });

        (status, payload).into_response()
    }
}
