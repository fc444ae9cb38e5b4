pub mod auth;
pub mod config;
pub mod email;
pub mod persistence;

pub use auth::{Argon2PasswordHasher, EcTokenSigner, SignerConfig};
pub use config::{AllowedOrigins, Settings};
pub use email::{PostmarkNotifier, RecordingNotifier, SentResetEmail};
pub use persistence::{HashMapCredentialStore, PostgresCredentialStore};
