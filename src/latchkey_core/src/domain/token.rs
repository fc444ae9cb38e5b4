use std::fmt;

use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, Secret};

use super::{email::Email, validation_error::ValidationError};

/// Store-assigned identifier of a persisted token record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(i64);

impl TokenId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Reset,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Reset => "reset",
            TokenKind::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TokenKind {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "reset" => Ok(TokenKind::Reset),
            "refresh" => Ok(TokenKind::Refresh),
            other => Err(ValidationError::UnknownTokenKind(other.to_owned())),
        }
    }
}

/// A token record that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewToken {
    pub email: Email,
    pub value: Secret<String>,
    pub kind: TokenKind,
    pub created_at: DateTime<Utc>,
}

impl NewToken {
    pub fn new(
        email: Email,
        value: Secret<String>,
        kind: TokenKind,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            email,
            value,
            kind,
            created_at,
        }
    }

    pub fn with_id(self, id: TokenId) -> Token {
        Token {
            id,
            email: self.email,
            value: self.value,
            kind: self.kind,
            created_at: self.created_at,
        }
    }
}

/// A persisted token record: either a reset token or the id of an issued
/// refresh token.
#[derive(Debug, Clone)]
pub struct Token {
    pub id: TokenId,
    pub email: Email,
    pub value: Secret<String>,
    pub kind: TokenKind,
    pub created_at: DateTime<Utc>,
}

impl Token {
    pub fn matches(&self, email: &Email, value: &str) -> bool {
        &self.email == email && self.value.expose_secret() == value
    }

    /// `None` means the record never ages out, as does a TTL reaching past
    /// the representable date range.
    pub fn is_expired(&self, ttl: Option<Duration>, now: DateTime<Utc>) -> bool {
        ttl.and_then(|ttl| self.created_at.checked_add_signed(ttl))
            .is_some_and(|deadline| deadline <= now)
    }
}
