use color_eyre::eyre::Report;
use latchkey_core::CredentialStoreError;
use thiserror::Error;

/// Outcome taxonomy shared by every credential operation.
///
/// The first six variants are expected, caller-facing results. Anything else
/// is an [`ProviderError::UnexpectedError`] carrying the underlying cause.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error("User not found")]
    UserNotFound,
    #[error("No valid token found")]
    NoValidTokenFound,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token could not be parsed")]
    TokenNotParsable,
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("unexpected error: {0:#}")]
    UnexpectedError(Report),
}

impl ProviderError {
    pub fn is_unexpected(&self) -> bool {
        matches!(self, Self::UnexpectedError(_))
    }

    pub(crate) fn unexpected<E>(error: E, context: &'static str) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::UnexpectedError(Report::new(error).wrap_err(context))
    }

    pub(crate) fn unexpected_msg(message: impl Into<String>) -> Self {
        Self::UnexpectedError(Report::msg(message.into()))
    }
}

impl PartialEq for ProviderError {
    fn eq(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl From<CredentialStoreError> for ProviderError {
    fn from(error: CredentialStoreError) -> Self {
        match error {
            CredentialStoreError::UserNotFound => Self::UserNotFound,
            CredentialStoreError::UserAlreadyExists => Self::UserAlreadyExists,
            CredentialStoreError::TokenNotFound => Self::NoValidTokenFound,
            e @ CredentialStoreError::UnexpectedError(_) => {
                Self::unexpected(e, "credential store failure")
            }
        }
    }
}
