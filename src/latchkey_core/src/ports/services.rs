use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{
    claims::Claims,
    email::Email,
    hashed_password::HashedPassword,
    password::Password,
    reset_token::ResetToken,
};

// TokenSigner port trait and errors
#[derive(Debug, Error)]
pub enum SignerError {
    #[error("Invalid signing key: {0}")]
    InvalidKey(String),
    #[error("Failed to sign token: {0}")]
    Signing(String),
    #[error("Token is malformed")]
    Malformed,
    #[error("Token signature is invalid: {0}")]
    InvalidSignature(String),
    #[error("Token has expired")]
    Expired,
    #[error("Token is not valid yet")]
    NotYetValid,
}

impl PartialEq for SignerError {
    fn eq(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// A freshly signed refresh token and the unique id embedded in it.
#[derive(Debug, Clone)]
pub struct IssuedRefreshToken {
    pub token: String,
    pub token_id: String,
}

/// Issues and verifies asymmetrically signed tokens.
pub trait TokenSigner: Send + Sync {
    fn issue_access_token(&self, email: &Email, claims: &Claims) -> Result<String, SignerError>;
    fn issue_refresh_token(&self, email: &Email) -> Result<IssuedRefreshToken, SignerError>;
    /// Checks signature, algorithm, audience, issuer, subject and time window,
    /// returning the full claim set on success.
    fn verify(&self, token: &str) -> Result<Claims, SignerError>;
}

// Notifier port trait and errors
#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("Failed to render message: {0}")]
    Template(String),
    #[error("Failed to deliver message: {0}")]
    Delivery(String),
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_password_reset_email(
        &self,
        recipient: &Email,
        token: &ResetToken,
        claims: &Claims,
    ) -> Result<(), NotifierError>;
}

// PasswordHasher port trait and errors
#[derive(Debug, Error)]
#[error("Password hashing failed: {0}")]
pub struct PasswordHashError(pub String);

#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<HashedPassword, PasswordHashError>;
    /// `Ok(false)` on mismatch. `Err` only when the hash cannot be evaluated.
    async fn verify(
        &self,
        password: &Password,
        hash: &HashedPassword,
    ) -> Result<bool, PasswordHashError>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

// ResetTokenGenerator port trait and errors
#[derive(Debug, Error)]
#[error("Random source unavailable: {0}")]
pub struct ResetTokenError(pub String);

pub trait ResetTokenGenerator: Send + Sync {
    fn generate(&self) -> Result<ResetToken, ResetTokenError>;
}
