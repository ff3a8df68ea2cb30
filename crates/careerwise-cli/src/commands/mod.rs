pub mod assess;
pub mod auth;
pub mod chat;
pub mod config;
pub mod profile;
