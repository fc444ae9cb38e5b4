use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::WithRejection;
use latchkey_application::{CredentialOperations, ProviderError, TokenPair};
use latchkey_core::{Email, Password};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use super::required;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<Secret<String>>,
    pub password: Option<Secret<String>>,
}

#[derive(Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<P>(
    State(provider): State<Arc<P>>,
    WithRejection(Json(request), _): WithRejection<Json<LoginRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError>
where
    P: CredentialOperations + 'static,
{
    let email = Email::try_from(required(request.email, "email")?)?;
    let password = Password::try_from(required(request.password, "password")?)?;

    match provider.login(email, password).await {
        Ok(pair) => Ok((StatusCode::OK, Json(TokenResponse::from(pair)))),
        Err(ProviderError::UserNotFound | ProviderError::IncorrectPassword) => {
            tracing::warn!("Login attempt with invalid credentials");
            Err(ApiError::InvalidCredentials)
        }
        Err(e) => Err(e.into()),
    }
}
