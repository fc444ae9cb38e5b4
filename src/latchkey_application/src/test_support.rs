//! Hand-written fakes for the ports, shared by the use case tests.

use std::sync::{
    Mutex,
    atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use latchkey_core::{
    Claims, CredentialStore, CredentialStoreError, Email, HashedPassword, IssuedRefreshToken,
    NewToken, Notifier, NotifierError, Password, PasswordHashError, PasswordHasher, ResetToken,
    ResetTokenError, ResetTokenGenerator, SignerError, Token, TokenId, TokenSigner, User,
    claim_names,
};
use secrecy::{ExposeSecret, Secret};
use serde_json::{Value, json};

pub fn email(raw: &str) -> Email {
    Email::try_from(Secret::from(raw.to_string())).unwrap()
}

pub fn password(raw: &str) -> Password {
    Password::try_from(Secret::from(raw.to_string())).unwrap()
}

pub fn plain_hash(raw: &str) -> HashedPassword {
    HashedPassword::from(format!("plain${raw}"))
}

#[derive(Default)]
pub struct MockStore {
    users: Mutex<Vec<User>>,
    tokens: Mutex<Vec<Token>>,
    next_id: AtomicI64,
    pub fail_create_token: AtomicBool,
    pub fail_update_user: AtomicBool,
    pub fail_rotate_token: AtomicBool,
}

impl MockStore {
    pub fn with_user(email_raw: &str, password_raw: &str, claims: Claims) -> Self {
        let store = Self::default();
        store.users.lock().unwrap().push(User::new(
            email(email_raw),
            plain_hash(password_raw),
            claims,
        ));
        store
    }

    pub fn stored_user(&self, email: &Email) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email() == email)
            .cloned()
    }

    pub fn tokens(&self) -> Vec<Token> {
        self.tokens.lock().unwrap().clone()
    }

    pub fn insert_token(&self, token: NewToken) -> TokenId {
        let id = TokenId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.tokens.lock().unwrap().push(token.with_id(id));
        id
    }
}

#[async_trait]
impl CredentialStore for MockStore {
    async fn user(&self, email: &Email) -> Result<User, CredentialStoreError> {
        self.stored_user(email)
            .ok_or(CredentialStoreError::UserNotFound)
    }

    async fn create_user(&self, user: User) -> Result<(), CredentialStoreError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email() == user.email()) {
            return Err(CredentialStoreError::UserAlreadyExists);
        }
        users.push(user);
        Ok(())
    }

    async fn update_user(&self, user: User) -> Result<(), CredentialStoreError> {
        if self.fail_update_user.load(Ordering::SeqCst) {
            return Err(CredentialStoreError::UnexpectedError("connection reset".into()));
        }
        let mut users = self.users.lock().unwrap();
        let slot = users
            .iter_mut()
            .find(|u| u.email() == user.email())
            .ok_or(CredentialStoreError::UserNotFound)?;
        *slot = user;
        Ok(())
    }

    async fn delete_user(&self, email: &Email) -> Result<(), CredentialStoreError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.email() != email);
        if users.len() == before {
            return Err(CredentialStoreError::UserNotFound);
        }
        self.tokens.lock().unwrap().retain(|t| &t.email != email);
        Ok(())
    }

    async fn create_token(&self, token: NewToken) -> Result<TokenId, CredentialStoreError> {
        if self.fail_create_token.load(Ordering::SeqCst) {
            return Err(CredentialStoreError::UnexpectedError("disk full".into()));
        }
        Ok(self.insert_token(token))
    }

    async fn tokens_by_email_and_value(
        &self,
        email: &Email,
        value: &str,
    ) -> Result<Vec<Token>, CredentialStoreError> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.matches(email, value))
            .cloned()
            .collect())
    }

    async fn delete_token(&self, id: TokenId) -> Result<(), CredentialStoreError> {
        let mut tokens = self.tokens.lock().unwrap();
        let before = tokens.len();
        tokens.retain(|t| t.id != id);
        if tokens.len() == before {
            return Err(CredentialStoreError::TokenNotFound);
        }
        Ok(())
    }

    async fn rotate_token(
        &self,
        consumed: TokenId,
        replacement: NewToken,
    ) -> Result<TokenId, CredentialStoreError> {
        if self.fail_rotate_token.load(Ordering::SeqCst) {
            return Err(CredentialStoreError::UnexpectedError("connection reset".into()));
        }
        {
            let mut tokens = self.tokens.lock().unwrap();
            let before = tokens.len();
            tokens.retain(|t| t.id != consumed);
            if tokens.len() == before {
                return Err(CredentialStoreError::TokenNotFound);
            }
        }
        Ok(self.insert_token(replacement))
    }
}

/// Produces readable `kind|email|jit` tokens instead of real signatures.
#[derive(Default)]
pub struct MockSigner {
    counter: AtomicUsize,
    pub fail_access: AtomicBool,
}

impl TokenSigner for MockSigner {
    fn issue_access_token(&self, email: &Email, claims: &Claims) -> Result<String, SignerError> {
        if self.fail_access.load(Ordering::SeqCst) {
            return Err(SignerError::Signing("key unavailable".into()));
        }
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        Ok(format!(
            "access|{}|{n}|{}",
            email.as_ref().expose_secret(),
            Value::Object(claims.clone())
        ))
    }

    fn issue_refresh_token(&self, email: &Email) -> Result<IssuedRefreshToken, SignerError> {
        let jit = format!("jit-{}", self.counter.fetch_add(1, Ordering::SeqCst));
        Ok(IssuedRefreshToken {
            token: format!("refresh|{}|{jit}", email.as_ref().expose_secret()),
            token_id: jit,
        })
    }

    fn verify(&self, token: &str) -> Result<Claims, SignerError> {
        match token.split('|').collect::<Vec<_>>().as_slice() {
            ["refresh", email, jit] => {
                let mut claims = Claims::new();
                claims.insert(claim_names::EMAIL.into(), json!(email));
                claims.insert(claim_names::TOKEN_ID.into(), json!(jit));
                Ok(claims)
            }
            ["numeric", email] => {
                let mut claims = Claims::new();
                claims.insert(claim_names::EMAIL.into(), json!(email));
                claims.insert(claim_names::TOKEN_ID.into(), json!(42));
                Ok(claims)
            }
            ["forged", ..] => Err(SignerError::InvalidSignature("bad signature".into())),
            ["expired", ..] => Err(SignerError::Expired),
            _ => Err(SignerError::Malformed),
        }
    }
}

#[derive(Default)]
pub struct MockHasher;

#[async_trait]
impl PasswordHasher for MockHasher {
    async fn hash(&self, password: &Password) -> Result<HashedPassword, PasswordHashError> {
        Ok(plain_hash(password.as_ref().expose_secret()))
    }

    async fn verify(
        &self,
        password: &Password,
        hash: &HashedPassword,
    ) -> Result<bool, PasswordHashError> {
        match hash.as_ref().expose_secret().strip_prefix("plain$") {
            Some(stored) => Ok(stored == password.as_ref().expose_secret()),
            None => Err(PasswordHashError("unrecognised hash".into())),
        }
    }
}

#[derive(Default)]
pub struct MockNotifier {
    pub sent: Mutex<Vec<(Email, ResetToken, Claims)>>,
    pub fail: AtomicBool,
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send_password_reset_email(
        &self,
        recipient: &Email,
        token: &ResetToken,
        claims: &Claims,
    ) -> Result<(), NotifierError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(NotifierError::Delivery("smtp relay down".into()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((recipient.clone(), token.clone(), claims.clone()));
        Ok(())
    }
}

/// Always hands out the same token, built from a repeated byte.
pub struct FixedResetTokenGenerator(pub u8);

impl ResetTokenGenerator for FixedResetTokenGenerator {
    fn generate(&self) -> Result<ResetToken, ResetTokenError> {
        Ok(ResetToken::from_bytes(&[self.0; 32]))
    }
}
