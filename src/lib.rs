pub mod common;
pub mod config;
pub mod errors;
pub mod export;
pub mod layout;

pub mod database;
pub mod services;

#[cfg(feature = "server")]
pub mod server;
