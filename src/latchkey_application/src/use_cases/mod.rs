pub mod create_user;
pub mod delete_user;
pub mod get_user;
pub mod login;
pub mod password_reset;
pub mod refresh;
pub mod update_user;
