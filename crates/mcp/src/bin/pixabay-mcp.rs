// Standalone MCP server binary

use anyhow::Result;
use clap::Parser;
use pixabay_mcp::server::McpServer;
use pixabay_mcp::tools::pixabay_registry;
use pixabay_mcp::Settings;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::parse();

    // stdout carries the protocol, so logs go to stderr
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pixabay_mcp=info,pixabay_sdk=info".into());
    if settings.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    tracing::info!("Pixabay MCP Server starting...");
    tracing::debug!(?settings, "Loaded settings");

    let client = settings.client()?;
    let registry = pixabay_registry(client)?;
    tracing::info!("Registered {} tools", registry.list_schemas().len());

    let server = Arc::new(McpServer::new(registry));
    server.start().await?;

    // tokio's stdin reader may still hold a blocking thread that would keep
    // the runtime from shutting down
    std::process::exit(0);
}
