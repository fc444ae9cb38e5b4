use latchkey_core::{
    Clock, CredentialStore, Email, NewToken, Password, PasswordHasher, TokenKind, TokenSigner,
};
use secrecy::Secret;

use crate::{
    error::ProviderError,
    token_pair::{TokenPair, sign_pair},
};

/// Login use case - exchanges an email and password for a token pair
pub struct LoginUseCase<'a, S, T, H>
where
    S: CredentialStore,
    T: TokenSigner,
    H: PasswordHasher,
{
    store: &'a S,
    signer: &'a T,
    hasher: &'a H,
    clock: &'a dyn Clock,
}

impl<'a, S, T, H> LoginUseCase<'a, S, T, H>
where
    S: CredentialStore,
    T: TokenSigner,
    H: PasswordHasher,
{
    pub fn new(store: &'a S, signer: &'a T, hasher: &'a H, clock: &'a dyn Clock) -> Self {
        Self {
            store,
            signer,
            hasher,
            clock,
        }
    }

    /// Execute the login use case
    ///
    /// # Returns
    /// A fresh access/refresh pair. The refresh token's id is persisted so it
    /// can be redeemed exactly once.
    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
    ) -> Result<TokenPair, ProviderError> {
        let user = self.store.user(&email).await?;

        let matches = self
            .hasher
            .verify(&password, user.password_hash())
            .await
            .map_err(|e| ProviderError::unexpected(e, "failed to verify password"))?;
        if !matches {
            return Err(ProviderError::IncorrectPassword);
        }

        let (pair, refresh) = sign_pair(self.signer, &user)?;

        self.store
            .create_token(NewToken::new(
                email,
                Secret::from(refresh.token_id),
                TokenKind::Refresh,
                self.clock.now(),
            ))
            .await
            .map_err(|e| ProviderError::unexpected(e, "failed to persist refresh token"))?;

        Ok(pair)
    }
}
