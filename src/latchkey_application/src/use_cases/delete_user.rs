use latchkey_core::{CredentialStore, Email};

use crate::error::ProviderError;

/// Delete user use case - removes the account and every token it owns
pub struct DeleteUserUseCase<'a, S>
where
    S: CredentialStore,
{
    store: &'a S,
}

impl<'a, S> DeleteUserUseCase<'a, S>
where
    S: CredentialStore,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    #[tracing::instrument(name = "DeleteUserUseCase::execute", skip(self))]
    pub async fn execute(&self, email: &Email) -> Result<(), ProviderError> {
        self.store.delete_user(email).await?;
        Ok(())
    }
}
