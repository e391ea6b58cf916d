pub mod chat;
pub mod config;
pub mod detect;
pub mod health;
pub mod keychain;
