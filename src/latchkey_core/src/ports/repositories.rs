use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    email::Email,
    token::{NewToken, Token, TokenId},
    user::User,
};

// CredentialStore port trait and errors
#[derive(Debug, Error)]
pub enum CredentialStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Token not found")]
    TokenNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for CredentialStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UserAlreadyExists, Self::UserAlreadyExists)
                | (Self::UserNotFound, Self::UserNotFound)
                | (Self::TokenNotFound, Self::TokenNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Durable storage for users and their token records.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn user(&self, email: &Email) -> Result<User, CredentialStoreError>;
    async fn create_user(&self, user: User) -> Result<(), CredentialStoreError>;
    /// Replaces the stored record for `user.email()`.
    async fn update_user(&self, user: User) -> Result<(), CredentialStoreError>;
    /// Removes the user together with every token record that references it.
    async fn delete_user(&self, email: &Email) -> Result<(), CredentialStoreError>;

    async fn create_token(&self, token: NewToken) -> Result<TokenId, CredentialStoreError>;
    /// Records matching both `email` and `value`, in ascending id order.
    async fn tokens_by_email_and_value(
        &self,
        email: &Email,
        value: &str,
    ) -> Result<Vec<Token>, CredentialStoreError>;
    async fn delete_token(&self, id: TokenId) -> Result<(), CredentialStoreError>;

    /// Deletes `consumed` and persists `replacement` as a single step.
    ///
    /// Fails with [`CredentialStoreError::TokenNotFound`] and leaves the store
    /// untouched when `consumed` is already gone, so two concurrent callers
    /// can never both redeem the same record.
    async fn rotate_token(
        &self,
        consumed: TokenId,
        replacement: NewToken,
    ) -> Result<TokenId, CredentialStoreError>;
}
