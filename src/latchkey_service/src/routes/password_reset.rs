use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::WithRejection;
use latchkey_application::{CredentialOperations, ProviderError};
use latchkey_core::{Email, Password, ResetToken};
use secrecy::Secret;
use serde::Deserialize;

use super::required;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct PasswordResetRequestBody {
    pub email: Option<Secret<String>>,
}

#[derive(Debug, Deserialize)]
pub struct PasswordResetBody {
    pub email: Option<Secret<String>>,
    pub reset_token: Option<Secret<String>>,
    pub password: Option<Secret<String>>,
}

/// Answers 201 whether or not the account exists.
#[tracing::instrument(name = "Password reset request", skip_all)]
pub async fn password_reset_request<P>(
    State(provider): State<Arc<P>>,
    WithRejection(Json(request), _): WithRejection<Json<PasswordResetRequestBody>, ApiError>,
) -> Result<StatusCode, ApiError>
where
    P: CredentialOperations + 'static,
{
    let email = Email::try_from(required(request.email, "email")?)?;

    match provider.create_password_reset_request(email).await {
        Ok(()) => Ok(StatusCode::CREATED),
        Err(ProviderError::UserNotFound) => {
            tracing::warn!("Password reset requested for an unknown user");
            Ok(StatusCode::CREATED)
        }
        Err(e) => Err(e.into()),
    }
}

#[tracing::instrument(name = "Password reset", skip_all)]
pub async fn password_reset<P>(
    State(provider): State<Arc<P>>,
    WithRejection(Json(request), _): WithRejection<Json<PasswordResetBody>, ApiError>,
) -> Result<StatusCode, ApiError>
where
    P: CredentialOperations + 'static,
{
    let email = Email::try_from(required(request.email, "email")?)?;
    let token = ResetToken::parse(required(request.reset_token, "reset_token")?)?;
    let password = Password::try_from(required(request.password, "password")?)?;

    match provider.reset_password(email, token, password).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(ProviderError::NoValidTokenFound | ProviderError::UserNotFound) => {
            tracing::warn!("Password reset with an invalid token");
            Err(ApiError::InvalidToken)
        }
        Err(e) => Err(e.into()),
    }
}
