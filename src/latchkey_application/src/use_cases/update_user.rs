use latchkey_core::{CredentialStore, Email, PasswordHasher, UserDetails, UserPatch};

use crate::error::ProviderError;

/// Update user use case - applies a partial patch to an existing account
pub struct UpdateUserUseCase<'a, S, H>
where
    S: CredentialStore,
    H: PasswordHasher,
{
    store: &'a S,
    hasher: &'a H,
}

impl<'a, S, H> UpdateUserUseCase<'a, S, H>
where
    S: CredentialStore,
    H: PasswordHasher,
{
    pub fn new(store: &'a S, hasher: &'a H) -> Self {
        Self { store, hasher }
    }

    /// Only the fields present in `patch` change. A new password is rehashed,
    /// new claims replace the old set wholesale.
    #[tracing::instrument(name = "UpdateUserUseCase::execute", skip(self, patch))]
    pub async fn execute(
        &self,
        email: &Email,
        patch: UserPatch,
    ) -> Result<UserDetails, ProviderError> {
        let mut user = self.store.user(email).await?;

        if let Some(password) = patch.password {
            let password_hash = self
                .hasher
                .hash(&password)
                .await
                .map_err(|e| ProviderError::unexpected(e, "failed to hash password"))?;
            user.set_password_hash(password_hash);
        }
        if let Some(claims) = patch.claims {
            user.set_claims(claims);
        }

        self.store.update_user(user.clone()).await?;

        Ok(user.into_details())
    }
}
