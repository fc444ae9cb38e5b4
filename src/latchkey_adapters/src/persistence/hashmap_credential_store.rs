use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use latchkey_core::{CredentialStore, CredentialStoreError, Email, NewToken, Token, TokenId, User};

#[derive(Default)]
struct Tables {
    users: HashMap<Email, User>,
    tokens: BTreeMap<TokenId, Token>,
    last_token_id: i64,
}

impl Tables {
    fn insert_token(&mut self, token: NewToken) -> TokenId {
        self.last_token_id += 1;
        let id = TokenId::new(self.last_token_id);
        self.tokens.insert(id, token.with_id(id));
        id
    }
}

/// In-memory credential store. Clones share the same tables.
#[derive(Default, Clone)]
pub struct HashMapCredentialStore {
    tables: Arc<RwLock<Tables>>,
}

impl HashMapCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn token_count(&self) -> usize {
        self.tables.read().await.tokens.len()
    }
}

#[async_trait::async_trait]
impl CredentialStore for HashMapCredentialStore {
    async fn user(&self, email: &Email) -> Result<User, CredentialStoreError> {
        let tables = self.tables.read().await;
        tables
            .users
            .get(email)
            .cloned()
            .ok_or(CredentialStoreError::UserNotFound)
    }

    async fn create_user(&self, user: User) -> Result<(), CredentialStoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.contains_key(user.email()) {
            return Err(CredentialStoreError::UserAlreadyExists);
        }
        tables.users.insert(user.email().clone(), user);
        Ok(())
    }

    async fn update_user(&self, user: User) -> Result<(), CredentialStoreError> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .users
            .get_mut(user.email())
            .ok_or(CredentialStoreError::UserNotFound)?;
        *stored = user;
        Ok(())
    }

    async fn delete_user(&self, email: &Email) -> Result<(), CredentialStoreError> {
        let mut tables = self.tables.write().await;
        tables
            .users
            .remove(email)
            .ok_or(CredentialStoreError::UserNotFound)?;
        tables.tokens.retain(|_, token| &token.email != email);
        Ok(())
    }

    async fn create_token(&self, token: NewToken) -> Result<TokenId, CredentialStoreError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&token.email) {
            return Err(CredentialStoreError::UserNotFound);
        }
        Ok(tables.insert_token(token))
    }

    async fn tokens_by_email_and_value(
        &self,
        email: &Email,
        value: &str,
    ) -> Result<Vec<Token>, CredentialStoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .tokens
            .values()
            .filter(|token| token.matches(email, value))
            .cloned()
            .collect())
    }

    async fn delete_token(&self, id: TokenId) -> Result<(), CredentialStoreError> {
        let mut tables = self.tables.write().await;
        tables
            .tokens
            .remove(&id)
            .ok_or(CredentialStoreError::TokenNotFound)?;
        Ok(())
    }

    async fn rotate_token(
        &self,
        consumed: TokenId,
        replacement: NewToken,
    ) -> Result<TokenId, CredentialStoreError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&replacement.email) {
            return Err(CredentialStoreError::UserNotFound);
        }
        tables
            .tokens
            .remove(&consumed)
            .ok_or(CredentialStoreError::TokenNotFound)?;
        Ok(tables.insert_token(replacement))
    }
}
