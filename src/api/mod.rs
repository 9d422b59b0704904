pub mod client;
pub mod endpoints;
pub mod gateway;
pub mod models;

pub use client::BackendClient;
pub use gateway::Gateway;
