pub mod config;
pub mod error;
pub mod gateway;
pub mod prompt;
pub mod provider;
pub mod store;
pub mod types;
