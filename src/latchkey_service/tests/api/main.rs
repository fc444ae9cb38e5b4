mod admin_users;
mod alive;
mod helpers;
mod login;
mod password_reset;
mod refresh;
