pub mod constants;
pub mod settings;

pub use constants::*;
pub use settings::{
    AdminApiSettings, AllowedOrigins, DatabaseSettings, EmailSettings, JwtSettings,
    PasswordResetSettings, ServerSettings, Settings,
};
