use latchkey_core::{Claims, CredentialStore, Email, Password, PasswordHasher, User, UserDetails};

use crate::error::ProviderError;

/// Create user use case - registers a new account with its claims
pub struct CreateUserUseCase<'a, S, H>
where
    S: CredentialStore,
    H: PasswordHasher,
{
    store: &'a S,
    hasher: &'a H,
}

impl<'a, S, H> CreateUserUseCase<'a, S, H>
where
    S: CredentialStore,
    H: PasswordHasher,
{
    pub fn new(store: &'a S, hasher: &'a H) -> Self {
        Self { store, hasher }
    }

    /// Execute the create user use case
    ///
    /// # Returns
    /// The stored user with its password masked, or `UserAlreadyExists`
    #[tracing::instrument(name = "CreateUserUseCase::execute", skip(self, password, claims))]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
        claims: Claims,
    ) -> Result<UserDetails, ProviderError> {
        let password_hash = self
            .hasher
            .hash(&password)
            .await
            .map_err(|e| ProviderError::unexpected(e, "failed to hash password"))?;
        let user = User::new(email, password_hash, claims);

        self.store.create_user(user.clone()).await?;

        Ok(user.into_details())
    }
}
