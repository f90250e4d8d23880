pub mod health;
pub mod layout;
