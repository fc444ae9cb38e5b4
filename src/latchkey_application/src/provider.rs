use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use latchkey_core::{
    Claims, Clock, CredentialStore, Email, Notifier, OsRngResetTokenGenerator, Password,
    PasswordHasher, ResetToken, ResetTokenGenerator, SystemClock, TokenSigner, UserDetails,
    UserPatch,
};

use crate::{
    error::ProviderError,
    token_pair::TokenPair,
    use_cases::{
        create_user::CreateUserUseCase,
        delete_user::DeleteUserUseCase,
        get_user::GetUserUseCase,
        login::LoginUseCase,
        password_reset::{CreatePasswordResetRequestUseCase, ResetPasswordUseCase},
        refresh::RefreshUseCase,
        update_user::UpdateUserUseCase,
    },
};

/// Default lifetime of a password reset token.
pub const DEFAULT_RESET_TOKEN_TTL: Duration = Duration::hours(24);

/// Every credential operation behind one object-safe interface, so the HTTP
/// layer can hold a provider without naming its collaborators.
#[async_trait]
pub trait CredentialOperations: Send + Sync {
    async fn login(&self, email: Email, password: Password) -> Result<TokenPair, ProviderError>;
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ProviderError>;
    async fn create_password_reset_request(&self, email: Email) -> Result<(), ProviderError>;
    async fn reset_password(
        &self,
        email: Email,
        token: ResetToken,
        password: Password,
    ) -> Result<(), ProviderError>;
    async fn create_user(
        &self,
        email: Email,
        password: Password,
        claims: Claims,
    ) -> Result<UserDetails, ProviderError>;
    async fn get_user(&self, email: &Email) -> Result<UserDetails, ProviderError>;
    async fn update_user(
        &self,
        email: &Email,
        patch: UserPatch,
    ) -> Result<UserDetails, ProviderError>;
    async fn delete_user(&self, email: &Email) -> Result<(), ProviderError>;
}

/// Stateless coordinator over the store, signer, notifier and hasher. All
/// mutable state lives in the store, so one provider can serve any number of
/// concurrent requests.
pub struct CredentialProvider<S, T, N, H>
where
    S: CredentialStore,
    T: TokenSigner,
    N: Notifier,
    H: PasswordHasher,
{
    store: S,
    signer: T,
    notifier: N,
    hasher: H,
    clock: Arc<dyn Clock>,
    reset_tokens: Arc<dyn ResetTokenGenerator>,
    reset_token_ttl: Option<Duration>,
}

impl<S, T, N, H> CredentialProvider<S, T, N, H>
where
    S: CredentialStore,
    T: TokenSigner,
    N: Notifier,
    H: PasswordHasher,
{
    pub fn new(store: S, signer: T, notifier: N, hasher: H) -> Self {
        Self {
            store,
            signer,
            notifier,
            hasher,
            clock: Arc::new(SystemClock),
            reset_tokens: Arc::new(OsRngResetTokenGenerator),
            reset_token_ttl: Some(DEFAULT_RESET_TOKEN_TTL),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_reset_token_generator(mut self, generator: Arc<dyn ResetTokenGenerator>) -> Self {
        self.reset_tokens = generator;
        self
    }

    /// `None` keeps reset tokens valid until they are redeemed.
    pub fn with_reset_token_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.reset_token_ttl = ttl;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[async_trait]
impl<S, T, N, H> CredentialOperations for CredentialProvider<S, T, N, H>
where
    S: CredentialStore,
    T: TokenSigner,
    N: Notifier,
    H: PasswordHasher,
{
    async fn login(&self, email: Email, password: Password) -> Result<TokenPair, ProviderError> {
        LoginUseCase::new(&self.store, &self.signer, &self.hasher, self.clock.as_ref())
            .execute(email, password)
            .await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ProviderError> {
        RefreshUseCase::new(&self.store, &self.signer, self.clock.as_ref())
            .execute(refresh_token)
            .await
    }

    async fn create_password_reset_request(&self, email: Email) -> Result<(), ProviderError> {
        CreatePasswordResetRequestUseCase::new(
            &self.store,
            &self.notifier,
            self.reset_tokens.as_ref(),
            self.clock.as_ref(),
        )
        .execute(email)
        .await
    }

    async fn reset_password(
        &self,
        email: Email,
        token: ResetToken,
        password: Password,
    ) -> Result<(), ProviderError> {
        ResetPasswordUseCase::new(
            &self.store,
            &self.hasher,
            self.clock.as_ref(),
            self.reset_token_ttl,
        )
        .execute(email, token, password)
        .await
    }

    async fn create_user(
        &self,
        email: Email,
        password: Password,
        claims: Claims,
    ) -> Result<UserDetails, ProviderError> {
        CreateUserUseCase::new(&self.store, &self.hasher)
            .execute(email, password, claims)
            .await
    }

    async fn get_user(&self, email: &Email) -> Result<UserDetails, ProviderError> {
        GetUserUseCase::new(&self.store).execute(email).await
    }

    async fn update_user(
        &self,
        email: &Email,
        patch: UserPatch,
    ) -> Result<UserDetails, ProviderError> {
        UpdateUserUseCase::new(&self.store, &self.hasher)
            .execute(email, patch)
            .await
    }

    async fn delete_user(&self, email: &Email) -> Result<(), ProviderError> {
        DeleteUserUseCase::new(&self.store).execute(email).await
    }
}
