use std::sync::Arc;

use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Basic};
use latchkey_adapters::Argon2PasswordHasher;
use latchkey_core::{HashedPassword, Password, PasswordHasher};
use secrecy::{ExposeSecret, Secret};

use crate::error::ErrorResponse;

const ARGON2_PREFIX: &str = "$argon2";
const REALM: &str = r#"Basic realm="latchkey-admin""#;

/// Username and password guarding the admin API. The password is either
/// the plain secret or an Argon2 PHC string of it.
#[derive(Clone)]
pub struct AdminCredentials {
    username: String,
    password: Secret<String>,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: Secret<String>) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    async fn verify(&self, username: &str, password: &str) -> bool {
        let expected = self.password.expose_secret();
        if expected.is_empty() || username != self.username {
            return false;
        }

        if !expected.starts_with(ARGON2_PREFIX) {
            return password == expected;
        }

        let Ok(candidate) = Password::try_from(password) else {
            return false;
        };
        let hash = HashedPassword::new(self.password.clone());

        Argon2PasswordHasher::new()
            .verify(&candidate, &hash)
            .await
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "Admin password hash could not be checked");
                false
            })
    }
}

pub async fn require_admin(
    State(admin): State<Arc<AdminCredentials>>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Response {
    let authorized = match headers.typed_get::<Authorization<Basic>>() {
        Some(Authorization(basic)) => admin.verify(basic.username(), basic.password()).await,
        None => false,
    };

    if !authorized {
        tracing::warn!("Rejected admin request");
        return unauthorized();
    }

    next.run(request).await
}

fn unauthorized() -> Response {
    let body = Json(ErrorResponse {
        error: "Unauthorized".to_owned(),
    });

    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, REALM)],
        body,
    )
        .into_response()
}
