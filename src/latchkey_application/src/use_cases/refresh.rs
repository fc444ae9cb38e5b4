use latchkey_core::{
    Claims, Clock, CredentialStore, Email, NewToken, SignerError, TokenKind, TokenSigner,
    claim_names,
};
use secrecy::Secret;

use crate::{
    error::ProviderError,
    token_pair::{TokenPair, sign_pair},
};

/// Refresh use case - redeems a refresh token exactly once for a new pair
pub struct RefreshUseCase<'a, S, T>
where
    S: CredentialStore,
    T: TokenSigner,
{
    store: &'a S,
    signer: &'a T,
    clock: &'a dyn Clock,
}

impl<'a, S, T> RefreshUseCase<'a, S, T>
where
    S: CredentialStore,
    T: TokenSigner,
{
    pub fn new(store: &'a S, signer: &'a T, clock: &'a dyn Clock) -> Self {
        Self {
            store,
            signer,
            clock,
        }
    }

    #[tracing::instrument(name = "RefreshUseCase::execute", skip_all)]
    pub async fn execute(&self, refresh_token: &str) -> Result<TokenPair, ProviderError> {
        let claims = self.signer.verify(refresh_token).map_err(|e| match e {
            SignerError::Malformed => ProviderError::TokenNotParsable,
            SignerError::InvalidSignature(_) | SignerError::Expired | SignerError::NotYetValid => {
                ProviderError::InvalidToken
            }
            other => ProviderError::unexpected(other, "failed to verify refresh token"),
        })?;

        let email = string_claim(&claims, claim_names::EMAIL)?;
        let email = Email::try_from(email.to_owned())
            .map_err(|e| ProviderError::unexpected(e, "refresh token carries an invalid email"))?;
        let token_id = string_claim(&claims, claim_names::TOKEN_ID)?;

        let consumed = self
            .store
            .tokens_by_email_and_value(&email, token_id)
            .await?
            .into_iter()
            .find(|t| t.kind == TokenKind::Refresh)
            .ok_or(ProviderError::NoValidTokenFound)?;

        let user = self.store.user(&email).await?;
        let (pair, refresh) = sign_pair(self.signer, &user)?;

        // Consuming the old record and storing the new one happen together,
        // so a token that lost a race comes back as TokenNotFound.
        self.store
            .rotate_token(
                consumed.id,
                NewToken::new(
                    email,
                    Secret::from(refresh.token_id),
                    TokenKind::Refresh,
                    self.clock.now(),
                ),
            )
            .await?;

        tracing::debug!(consumed = %consumed.id, "refresh token rotated");
        Ok(pair)
    }
}

fn string_claim<'c>(claims: &'c Claims, name: &str) -> Result<&'c str, ProviderError> {
    claims
        .get(name)
        .and_then(|value| value.as_str())
        .ok_or_else(|| ProviderError::unexpected_msg(format!("claim {name:?} is not a string")))
}
