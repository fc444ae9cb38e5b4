//! # Latchkey - Credential Service Library
//!
//! This is a facade crate that re-exports the public APIs of the latchkey
//! components: login with password, refresh-token rotation, password reset
//! by emailed one-time token, and admin management of user records.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! latchkey = { path = "../latchkey" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `User`, `Token`, `ResetToken`, etc.
//! - **Ports**: `CredentialStore`, `TokenSigner`, `Notifier`, `PasswordHasher`, `Clock`
//! - **Provider**: `CredentialProvider` and one use case per operation
//! - **Adapters**: `EcTokenSigner`, `PostgresCredentialStore`, `PostmarkNotifier`, etc.
//! - **Service**: `CredentialService` - the HTTP entry point

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use latchkey_core::*;
}

pub use latchkey_core::{
    Claims, Email, HashedPassword, MASKED_PASSWORD, Password, ResetToken, Token, TokenId,
    TokenKind, User, UserDetails, UserPatch, ValidationError, claim_names,
};

// ============================================================================
// Ports
// ============================================================================

/// Port definitions implemented by the adapters
pub mod ports {
    pub use latchkey_core::{
        Clock, CredentialStore, CredentialStoreError, Notifier, NotifierError, PasswordHashError,
        PasswordHasher, ResetTokenError, ResetTokenGenerator, SignerError, TokenSigner,
    };
}

pub use ports::{
    Clock, CredentialStore, CredentialStoreError, Notifier, NotifierError, PasswordHasher,
    ResetTokenGenerator, SignerError, TokenSigner,
};

// ============================================================================
// Credential Provider (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use latchkey_application::*;
}

pub use latchkey_application::{
    CredentialOperations, CredentialProvider, ProviderError, TokenPair,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Token signing and password hashing
    pub mod auth {
        pub use latchkey_adapters::auth::*;
    }

    /// Credential store implementations
    pub mod persistence {
        pub use latchkey_adapters::persistence::*;
    }

    /// Password reset notifiers
    pub mod email {
        pub use latchkey_adapters::email::*;
    }

    /// Configuration
    pub mod config {
        pub use latchkey_adapters::config::*;
    }
}

pub use latchkey_adapters::{
    Argon2PasswordHasher, EcTokenSigner, HashMapCredentialStore, PostgresCredentialStore,
    PostmarkNotifier, RecordingNotifier, Settings, SignerConfig,
};

// ============================================================================
// Credential Service (Main Entry Point)
// ============================================================================

pub use latchkey_service::{AdminCredentials, AllowedOrigins, CredentialService};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the ports
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
