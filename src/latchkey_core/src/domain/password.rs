use secrecy::{ExposeSecret, Secret};

use super::validation_error::ValidationError;

/// A plaintext password supplied by a caller. Only its hash is ever stored.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    fn parse(raw: Secret<String>) -> Result<Self, ValidationError> {
        if raw.expose_secret().is_empty() {
            return Err(ValidationError::EmptyPassword);
        }
        Ok(Self(raw))
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = ValidationError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Password {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(Secret::from(value))
    }
}

impl TryFrom<&str> for Password {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(Secret::from(value.to_owned()))
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}
