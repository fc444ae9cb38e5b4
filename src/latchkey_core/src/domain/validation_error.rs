use thiserror::Error;

/// Rejections produced while parsing raw input into domain value types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password must not be empty")]
    EmptyPassword,
    #[error("Reset token must be {expected} lower-case hex characters")]
    MalformedResetToken { expected: usize },
    #[error("Unknown token kind {0:?}")]
    UnknownTokenKind(String),
}
