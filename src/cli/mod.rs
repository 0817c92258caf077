pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "receptar")]
#[command(about = "Receptar - recipe catalog and shopping list service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, env = "HOST")]
        host: Option<String>,
    },

    /// Run the MCP tool server on stdin/stdout
    Mcp,

    /// Query a running server's similarity search
    Search {
        /// Search query
        query: String,

        /// Maximum number of recipe names to return
        #[arg(short, long)]
        limit: Option<usize>,
    },
}
