pub mod error;
pub mod provider;
pub mod token_pair;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::ProviderError;
pub use provider::{CredentialOperations, CredentialProvider, DEFAULT_RESET_TOKEN_TTL};
pub use token_pair::TokenPair;
pub use use_cases::{
    create_user::CreateUserUseCase,
    delete_user::DeleteUserUseCase,
    get_user::GetUserUseCase,
    login::LoginUseCase,
    password_reset::{CreatePasswordResetRequestUseCase, ResetPasswordUseCase},
    refresh::RefreshUseCase,
    update_user::UpdateUserUseCase,
};
