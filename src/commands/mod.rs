pub mod compose;
pub mod config;
pub mod generate;
pub mod health;
pub mod status;
pub mod validate;
