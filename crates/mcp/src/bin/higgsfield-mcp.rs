// Standalone MCP server binary (stdio transport)

use anyhow::Result;
use clap::Parser;
use higgsfield_mcp::config::{
    log_directives, resolve_from_env, CredentialOverrides, FileConfig, DEFAULT_CONFIG_FILE,
    DEFAULT_LOG_FILTER, ENV_API_KEY, ENV_SECRET,
};
use higgsfield_mcp::McpServer;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "higgsfield-mcp")]
#[command(version, about = "MCP server for Higgsfield image and video generation", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Higgsfield API key (overrides HF_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Higgsfield API secret (overrides HF_SECRET)
    #[arg(long)]
    secret: Option<String>,

    /// API base URL (overrides HF_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before the subscriber, so RUST_LOG from .env applies
    let dotenv = dotenvy::dotenv();
    let args = Args::parse();

    // stdout carries the protocol, logs go to stderr
    let directives = log_directives(|name| std::env::var(name).ok());
    let filter = tracing_subscriber::EnvFilter::try_new(directives)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));
    if args.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_target(false)
            .init();
    }

    if let Ok(path) = &dotenv {
        tracing::debug!(path = %path.display(), "Loaded .env");
    }

    tracing::info!("Higgsfield MCP server starting...");

    let file = FileConfig::load(&args.config)?;
    let overrides = CredentialOverrides {
        api_key: args.api_key,
        secret: args.secret,
        base_url: args.base_url,
    };
    let config = resolve_from_env(&overrides, &file);
    tracing::debug!(?config, "Resolved configuration");

    if !config.has_credentials() {
        tracing::warn!(
            "Missing credentials: set {} and {} (or pass --api-key/--secret); API calls will fail",
            ENV_API_KEY,
            ENV_SECRET
        );
    }

    let client = Arc::new(config.build_client()?);
    tracing::info!(base_url = %client.config().base_url, "Using Higgsfield API");

    let server = McpServer::for_client(client);
    server.start().await?;

    Ok(())
}
