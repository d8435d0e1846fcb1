pub mod account;
pub mod current_user;
pub mod health;
pub mod password_reset;
pub mod settings;
