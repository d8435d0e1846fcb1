pub mod db;
pub mod hashing;
pub mod mail;
pub mod session;
