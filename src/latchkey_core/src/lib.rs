pub mod domain;
pub mod ports;
pub mod system;

// Re-export commonly used types for convenience
pub use domain::{
    claims::{Claims, RESERVED_CLAIMS, names as claim_names},
    email::Email,
    hashed_password::HashedPassword,
    password::Password,
    reset_token::{RESET_TOKEN_BYTES, ResetToken},
    token::{NewToken, Token, TokenId, TokenKind},
    user::{MASKED_PASSWORD, User, UserDetails, UserPatch},
    validation_error::ValidationError,
};

pub use ports::{
    repositories::{CredentialStore, CredentialStoreError},
    services::{
        Clock, IssuedRefreshToken, Notifier, NotifierError, PasswordHashError, PasswordHasher,
        ResetTokenError, ResetTokenGenerator, SignerError, TokenSigner,
    },
};

pub use system::{ManualClock, OsRngResetTokenGenerator, SystemClock};
