pub mod schema;
pub mod server;

pub use server::McpServer;
