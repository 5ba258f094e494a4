use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::state::round::{ConfirmError, RoundFull, UserId};

/// Errors that can occur in service layer operations.
///
/// Every variant is an expected, recoverable condition reported to the
/// caller; none of them aborts the dispatcher or corrupts the round state.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The current round has no remaining slots.
    #[error("round {round} is full ({capacity} players)")]
    RoundFull {
        /// Round that ran out of slots.
        round: u32,
        /// Maximum number of players the round can hold.
        capacity: u32,
    },
    /// The user has no registration in the current round.
    #[error("user {0} is not registered for the current round")]
    NotRegistered(UserId),
    /// Unauthorized access attempt.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// Invalid input provided by the client.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<RoundFull> for ServiceError {
    fn from(err: RoundFull) -> Self {
        ServiceError::RoundFull {
            round: err.round,
            capacity: err.capacity,
        }
    }
}

impl From<ConfirmError> for ServiceError {
    fn from(err: ConfirmError) -> Self {
        match err {
            ConfirmError::RoundFull(full) => full.into(),
            ConfirmError::NotRegistered(user_id) => ServiceError::NotRegistered(user_id),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        AppError::BadRequest(format!("validation failed: {}", err))
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Unauthorized access attempt.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// Requested resource not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// Conflict with current state.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::RoundFull { .. } => AppError::Conflict(err.to_string()),
            ServiceError::NotRegistered(_) => AppError::NotFound(err.to_string()),
            ServiceError::Unauthorized(message) => AppError::Unauthorized(message),
            ServiceError::InvalidInput(message) => AppError::BadRequest(message),
        }
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
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let payload = Json(ErrorBody {
            message: self.to_string(),
        });

        (status, payload).into_response()
    }
}
