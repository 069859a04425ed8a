pub mod admin;
pub mod health;
pub mod landmarks;
pub mod notifications;
pub mod profile;
pub mod saved;
pub mod signup;
