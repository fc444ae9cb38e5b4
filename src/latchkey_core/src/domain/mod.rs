pub mod claims;
pub mod email;
pub mod hashed_password;
pub mod password;
pub mod reset_token;
pub mod token;
pub mod user;
pub mod validation_error;
