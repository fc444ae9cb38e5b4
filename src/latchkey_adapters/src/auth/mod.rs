pub mod argon2_password_hasher;
pub mod ec_token_signer;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use ec_token_signer::{
    DEFAULT_ACCESS_TOKEN_TTL, DEFAULT_REFRESH_TOKEN_TTL, EcTokenSigner, SignerConfig,
};
