pub mod detector;
pub mod health;
pub mod home;
pub mod settings;
