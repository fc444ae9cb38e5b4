mod admin_auth;
mod credential_service;
pub mod error;
pub mod routes;
mod tracing;

pub use admin_auth::AdminCredentials;
pub use credential_service::CredentialService;
pub use error::{ApiError, ErrorResponse};
pub use latchkey_adapters::AllowedOrigins;
