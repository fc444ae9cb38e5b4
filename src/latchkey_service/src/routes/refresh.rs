use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::WithRejection;
use latchkey_application::{CredentialOperations, ProviderError};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::{login::TokenResponse, required};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: Option<Secret<String>>,
}

#[tracing::instrument(name = "Refresh", skip_all)]
pub async fn refresh<P>(
    State(provider): State<Arc<P>>,
    WithRejection(Json(request), _): WithRejection<Json<RefreshRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError>
where
    P: CredentialOperations + 'static,
{
    let refresh_token = required(request.refresh_token, "refresh_token")?;

    match provider.refresh(refresh_token.expose_secret()).await {
        Ok(pair) => Ok((StatusCode::OK, Json(TokenResponse::from(pair)))),
        Err(
            e @ (ProviderError::TokenNotParsable
            | ProviderError::InvalidToken
            | ProviderError::NoValidTokenFound
            | ProviderError::UserNotFound),
        ) => {
            tracing::warn!(reason = %e, "Refresh token rejected");
            Err(ApiError::InvalidToken)
        }
        Err(e) => Err(e.into()),
    }
}
