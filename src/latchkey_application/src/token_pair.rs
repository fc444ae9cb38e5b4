use std::fmt;

use latchkey_core::{IssuedRefreshToken, TokenSigner, User};

use crate::error::ProviderError;

/// Access and refresh token handed back by login and refresh.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

/// Signs a fresh access token carrying the user's claims and a fresh
/// refresh token. Persisting the refresh id is left to the caller.
pub(crate) fn sign_pair<T>(
    signer: &T,
    user: &User,
) -> Result<(TokenPair, IssuedRefreshToken), ProviderError>
where
    T: TokenSigner + ?Sized,
{
    let access_token = signer
        .issue_access_token(user.email(), user.claims())
        .map_err(|e| ProviderError::unexpected(e, "failed to generate access token"))?;
    let refresh = signer
        .issue_refresh_token(user.email())
        .map_err(|e| ProviderError::unexpected(e, "failed to generate refresh token"))?;

    let pair = TokenPair {
        access_token,
        refresh_token: refresh.token.clone(),
    };
    Ok((pair, refresh))
}
