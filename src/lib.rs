pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod mcp;
pub mod search;
pub mod shopping;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
