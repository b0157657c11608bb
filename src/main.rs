//! IRSearch UI server
//!
//! This is the main entry point for the application.

use anyhow::Result;
use clap::Parser;
use irsearch_ui::{
    config,
    network::HttpClient,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Debug, Parser)]
#[command(name = "irsearch-ui", version, about = "Search results page for comparing retrieval models")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "IRSEARCH_SETTINGS_PATH")]
    config: Option<PathBuf>,

    /// Server port
    #[arg(short, long)]
    port: Option<u16>,

    /// Base URL of the search backend
    #[arg(long)]
    backend_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings_path = config::locate(cli.config.as_deref());
    let mut settings = config::load(settings_path.as_deref())?;
    if let Some(port) = cli.port {
        settings.server.port = port;
    }
    if let Some(url) = cli.backend_url {
        settings.backend.base_url = url;
    }

    // Initialize logging
    let default_level = if settings.general.debug { "debug" } else { "info" };
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    info!("Starting IRSearch UI v{}", irsearch_ui::VERSION);
    match settings_path {
        Some(path) => info!("Loaded settings from: {}", path.display()),
        None => info!("No settings file found, using defaults"),
    }
    info!("Loaded configuration for instance: {}", settings.general.instance_name);

    // Initialize HTTP client
    let client = HttpClient::with_settings(&settings.backend)?;
    info!("Search backend: {}", client.endpoint());

    // Create application state
    let state = AppState::new(settings.clone(), client)?;

    // Create router
    let app = create_router(state);

    // Bind address
    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
