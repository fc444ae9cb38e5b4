use secrecy::{ExposeSecret, Secret};

use super::validation_error::ValidationError;

/// Number of random bytes behind every reset token.
pub const RESET_TOKEN_BYTES: usize = 32;

const RESET_TOKEN_LEN: usize = RESET_TOKEN_BYTES * 2;

/// Single-use password reset token, the lower-case hex encoding of
/// [`RESET_TOKEN_BYTES`] random bytes.
#[derive(Debug, Clone)]
pub struct ResetToken(Secret<String>);

impl ResetToken {
    pub fn from_bytes(bytes: &[u8; RESET_TOKEN_BYTES]) -> Self {
        Self(Secret::from(hex::encode(bytes)))
    }

    pub fn parse(raw: Secret<String>) -> Result<Self, ValidationError> {
        let value = raw.expose_secret();
        let well_formed = value.len() == RESET_TOKEN_LEN
            && value
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if !well_formed {
            return Err(ValidationError::MalformedResetToken {
                expected: RESET_TOKEN_LEN,
            });
        }
        Ok(Self(raw))
    }
}

impl AsRef<Secret<String>> for ResetToken {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for ResetToken {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}
