use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use latchkey_application::ProviderError;
use latchkey_core::ValidationError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Internal server error")]
    UnexpectedError(String),
}

impl ApiError {
    pub fn missing(field: &str) -> Self {
        ApiError::InvalidInput(format!("{field} must be set"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials | ApiError::InvalidToken => StatusCode::UNAUTHORIZED,
            ApiError::UserNotFound => StatusCode::NOT_FOUND,
            ApiError::UserAlreadyExists => StatusCode::CONFLICT,
            ApiError::UnexpectedError(ref cause) => {
                tracing::error!(error = %cause, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status_code, body).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

/// Admin-facing mapping. Credential routes translate `UserNotFound` and the
/// token kinds themselves so they can answer 401 instead.
impl From<ProviderError> for ApiError {
    fn from(error: ProviderError) -> Self {
        match error {
            ProviderError::UserNotFound => ApiError::UserNotFound,
            ProviderError::UserAlreadyExists => ApiError::UserAlreadyExists,
            ProviderError::IncorrectPassword => ApiError::InvalidCredentials,
            ProviderError::NoValidTokenFound
            | ProviderError::InvalidToken
            | ProviderError::TokenNotParsable => ApiError::InvalidToken,
            ProviderError::UnexpectedError(report) => {
                ApiError::UnexpectedError(format!("{report:#}"))
            }
        }
    }
}
