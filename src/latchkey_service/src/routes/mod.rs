pub mod admin_users;
pub mod alive;
pub mod login;
pub mod password_reset;
pub mod refresh;

pub use admin_users::{create_user, delete_user, get_user, update_user};
pub use alive::alive;
pub use login::login;
pub use password_reset::{password_reset, password_reset_request};
pub use refresh::refresh;

use secrecy::{ExposeSecret, Secret};

use crate::error::ApiError;

/// Absent and empty fields are both rejected.
fn required(value: Option<Secret<String>>, field: &str) -> Result<Secret<String>, ApiError> {
    value
        .filter(|value| !value.expose_secret().is_empty())
        .ok_or_else(|| ApiError::missing(field))
}
