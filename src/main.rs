use clap::Parser;
use receptar::{
    api::{handlers::AppState, routes},
    cli::{Cli, Commands},
    config::Settings,
    error::Error,
    loader, search,
    shopping::ShoppingList,
    Result,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    let _ = dotenvy::dotenv();

    // Initialize logging. Logs always go to stderr: the mcp command
    // reserves stdout for the JSON-RPC transport.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,receptar=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::from_env()?;
    settings.validate()?;

    match cli.command {
        Commands::Serve { port, host } => {
            serve(settings, port, host).await?;
        }
        Commands::Mcp => {
            mcp(settings).await?;
        }
        Commands::Search { query, limit } => {
            search_recipes(settings, query, limit).await?;
        }
    }

    Ok(())
}

/// Load the dataset and assemble shared application state.
fn build_state(settings: &Settings) -> AppState {
    let records = loader::load_recipes(&settings.data.csv_path);
    let search = search::build_search(&settings.search, &records);
    let catalog = Arc::new(receptar::catalog::RecipeCatalog::new(records));

    info!(
        "Catalog ready: {} recipes, {} ingredients, {} diet types, {} meal types",
        catalog.len(),
        catalog.all_ingredients().len(),
        catalog.all_diet_types().len(),
        catalog.all_meal_types().len()
    );

    AppState {
        catalog,
        shopping_list: Arc::new(RwLock::new(ShoppingList::new())),
        search,
        settings: settings.clone(),
    }
}

async fn serve(mut settings: Settings, port: Option<u16>, host: Option<String>) -> Result<()> {
    // Override settings with CLI arguments
    if let Some(port) = port {
        settings.server.port = port;
    }
    if let Some(host) = host {
        settings.server.host = host;
    }

    info!("Starting Receptar server");
    info!("Dataset: {}", settings.data.csv_path.display());
    info!("Server: {}:{}", settings.server.host, settings.server.port);

    let state = build_state(&settings);
    let app = routes::create_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    println!("\n========================================");
    println!("Receptar Server");
    println!("========================================");
    println!("Status: Running");
    println!("Address: http://{addr}");
    println!("\nAPI Endpoints:");
    println!("  GET  /api/recipes");
    println!("  GET  /api/recipes/search");
    println!("  GET  /api/recipes/by-name");
    println!("  GET  /api/ingredients");
    println!("  GET  /api/shopping-list");
    println!("  POST /api/shopping-list/add");
    println!("  GET  /api/semantic/by-text");
    println!("\nPress Ctrl+C to stop");
    println!("========================================\n");

    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Internal(format!("Server error: {e}")))?;

    info!("Shutting down...");
    Ok(())
}

async fn mcp(settings: Settings) -> Result<()> {
    info!("Starting Receptar MCP server");

    let state = build_state(&settings);
    let server = receptar::mcp::McpServer::new(state);

    server.run_stdio().await
}

async fn search_recipes(settings: Settings, query: String, limit: Option<usize>) -> Result<()> {
    let server_url = settings
        .server
        .external_url
        .unwrap_or_else(|| format!("http://{}:{}", settings.server.host, settings.server.port));

    receptar::cli::commands::search(&server_url, &query, limit).await
}
