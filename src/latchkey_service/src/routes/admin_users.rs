use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use latchkey_application::CredentialOperations;
use latchkey_core::{Claims, Email, Password, UserDetails, UserPatch};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use super::required;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: Option<Secret<String>>,
    pub password: Option<Secret<String>>,
    pub claims: Option<Claims>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<Secret<String>>,
    pub claims: Option<Claims>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub email: String,
    pub password: String,
    pub claims: Claims,
}

impl From<UserDetails> for UserResponse {
    fn from(details: UserDetails) -> Self {
        Self {
            email: details.email().as_ref().expose_secret().clone(),
            password: details.password().to_owned(),
            claims: details.claims().clone(),
        }
    }
}

#[tracing::instrument(name = "Create user", skip_all)]
pub async fn create_user<P>(
    State(provider): State<Arc<P>>,
    WithRejection(Json(request), _): WithRejection<Json<CreateUserRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError>
where
    P: CredentialOperations + 'static,
{
    let email = Email::try_from(required(request.email, "email")?)?;
    let password = Password::try_from(required(request.password, "password")?)?;

    let details = provider
        .create_user(email, password, request.claims.unwrap_or_default())
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(details))))
}

#[tracing::instrument(name = "Get user", skip_all)]
pub async fn get_user<P>(
    State(provider): State<Arc<P>>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    P: CredentialOperations + 'static,
{
    let email = Email::try_from(email)?;
    let details = provider.get_user(&email).await?;

    Ok(Json(UserResponse::from(details)))
}

/// Omitted fields are left unchanged. The email is the identity and cannot be
/// changed.
#[tracing::instrument(name = "Update user", skip_all)]
pub async fn update_user<P>(
    State(provider): State<Arc<P>>,
    Path(email): Path<String>,
    WithRejection(Json(request), _): WithRejection<Json<UpdateUserRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError>
where
    P: CredentialOperations + 'static,
{
    if request.email.is_some_and(|e| !e.is_empty()) {
        return Err(ApiError::InvalidInput("email can not be changed".to_owned()));
    }

    let email = Email::try_from(email)?;
    let password = request
        .password
        .filter(|p| !p.expose_secret().is_empty())
        .map(Password::try_from)
        .transpose()?;
    let patch = UserPatch {
        password,
        claims: request.claims,
    };

    let details = provider.update_user(&email, patch).await?;

    Ok(Json(UserResponse::from(details)))
}

#[tracing::instrument(name = "Delete user", skip_all)]
pub async fn delete_user<P>(
    State(provider): State<Arc<P>>,
    Path(email): Path<String>,
) -> Result<StatusCode, ApiError>
where
    P: CredentialOperations + 'static,
{
    let email = Email::try_from(email)?;
    provider.delete_user(&email).await?;

    Ok(StatusCode::NO_CONTENT)
}
