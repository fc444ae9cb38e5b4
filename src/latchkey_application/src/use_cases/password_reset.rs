use chrono::Duration;
use latchkey_core::{
    Clock, CredentialStore, Email, NewToken, Notifier, Password, PasswordHasher, ResetToken,
    ResetTokenGenerator, TokenKind,
};
use secrecy::ExposeSecret;

use crate::error::ProviderError;

/// Issues a one-time reset token and mails it to the account owner
pub struct CreatePasswordResetRequestUseCase<'a, S, N>
where
    S: CredentialStore,
    N: Notifier,
{
    store: &'a S,
    notifier: &'a N,
    generator: &'a dyn ResetTokenGenerator,
    clock: &'a dyn Clock,
}

impl<'a, S, N> CreatePasswordResetRequestUseCase<'a, S, N>
where
    S: CredentialStore,
    N: Notifier,
{
    pub fn new(
        store: &'a S,
        notifier: &'a N,
        generator: &'a dyn ResetTokenGenerator,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            store,
            notifier,
            generator,
            clock,
        }
    }

    #[tracing::instrument(name = "CreatePasswordResetRequestUseCase::execute", skip(self))]
    pub async fn execute(&self, email: Email) -> Result<(), ProviderError> {
        let user = self.store.user(&email).await?;

        let token = self
            .generator
            .generate()
            .map_err(|e| ProviderError::unexpected(e, "failed to generate reset token"))?;

        self.store
            .create_token(NewToken::new(
                email.clone(),
                token.as_ref().clone(),
                TokenKind::Reset,
                self.clock.now(),
            ))
            .await
            .map_err(|e| ProviderError::unexpected(e, "failed to persist reset token"))?;

        self.notifier
            .send_password_reset_email(&email, &token, user.claims())
            .await
            .map_err(|e| ProviderError::unexpected(e, "failed to send password reset email"))?;

        Ok(())
    }
}

/// Redeems a reset token, replacing the account password
pub struct ResetPasswordUseCase<'a, S, H>
where
    S: CredentialStore,
    H: PasswordHasher,
{
    store: &'a S,
    hasher: &'a H,
    clock: &'a dyn Clock,
    token_ttl: Option<Duration>,
}

impl<'a, S, H> ResetPasswordUseCase<'a, S, H>
where
    S: CredentialStore,
    H: PasswordHasher,
{
    pub fn new(
        store: &'a S,
        hasher: &'a H,
        clock: &'a dyn Clock,
        token_ttl: Option<Duration>,
    ) -> Self {
        Self {
            store,
            hasher,
            clock,
            token_ttl,
        }
    }

    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip(self, token, password))]
    pub async fn execute(
        &self,
        email: Email,
        token: ResetToken,
        password: Password,
    ) -> Result<(), ProviderError> {
        let now = self.clock.now();
        let record = self
            .store
            .tokens_by_email_and_value(&email, token.as_ref().expose_secret())
            .await?
            .into_iter()
            .find(|t| t.kind == TokenKind::Reset && !t.is_expired(self.token_ttl, now))
            .ok_or(ProviderError::NoValidTokenFound)?;

        let mut user = self.store.user(&email).await?;
        let password_hash = self
            .hasher
            .hash(&password)
            .await
            .map_err(|e| ProviderError::unexpected(e, "failed to hash password"))?;
        user.set_password_hash(password_hash);
        self.store.update_user(user).await?;

        // Only burn the token once the new password is stored.
        self.store.delete_token(record.id).await?;

        Ok(())
    }
}
