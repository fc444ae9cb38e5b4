use latchkey_core::{CredentialStore, Email, UserDetails};

use crate::error::ProviderError;

pub struct GetUserUseCase<'a, S>
where
    S: CredentialStore,
{
    store: &'a S,
}

impl<'a, S> GetUserUseCase<'a, S>
where
    S: CredentialStore,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    #[tracing::instrument(name = "GetUserUseCase::execute", skip(self))]
    pub async fn execute(&self, email: &Email) -> Result<UserDetails, ProviderError> {
        Ok(self.store.user(email).await?.into_details())
    }
}
