//! Chat server entry point.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use chat_server::api::AppState;
use chat_server::config::{Config, LogFormat, PING_PATH};
use chat_server::db::ChatStore;
use chat_server::graphql::build_schema;
use chat_server::{metrics, FrontDoor, ServerError};

/// Chat backend with a liveness check and a GraphQL endpoint.
#[derive(Parser, Debug)]
#[command(name = "chat-server")]
#[command(about = "HTTP front door serving /_ping and GraphQL over a static chat snapshot")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// Listening port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// Listening port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Print the GraphQL schema in SDL.
    PrintSchema,

    /// Dump the seeded chat snapshot as JSON.
    Chats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    init_tracing(&config, args.verbose);

    // Handle subcommands
    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::PrintSchema) => cmd_print_schema(),
        Some(Command::Chats) => cmd_chats(),
        Some(Command::Serve { port }) => cmd_serve(config, port.or(args.port)).await,
        None => cmd_serve(config, args.port).await,
    }
}

fn init_tracing(config: &Config, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("chat_server=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    match config.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init(),
    }
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("CHAT SERVER - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(ServerError::InvalidConfig(e).into());
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Listen Address: {}", config.socket_addr());
    println!("  Public URL: {}", config.public_url());
    println!("  Liveness Path: {}", PING_PATH);
    println!("  GraphQL Path: {}", config.graphql_path);
    println!(
        "  GraphiQL: {}",
        if config.graphql_playground { "Enabled" } else { "Disabled" }
    );
    println!("  JSON Body Limit: {} bytes", config.json_body_limit);
    println!(
        "  Metrics: {}",
        if config.metrics_enabled { "Enabled" } else { "Disabled" }
    );
    println!("  Log Format: {}", config.log_format);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Print the GraphQL schema in SDL.
fn cmd_print_schema() -> anyhow::Result<()> {
    let schema = build_schema(Arc::new(ChatStore::seeded()));
    println!("{}", schema.sdl());
    Ok(())
}

/// Dump the seeded chat snapshot as JSON.
fn cmd_chats() -> anyhow::Result<()> {
    let store = ChatStore::seeded();
    let dump = serde_json::json!({
        "chats": store.chats(),
        "messages": store.messages(),
    });
    println!("{}", serde_json::to_string_pretty(&dump).map_err(ServerError::from)?);
    Ok(())
}

/// Run the HTTP server until a shutdown signal.
async fn cmd_serve(mut config: Config, port_override: Option<u16>) -> anyhow::Result<()> {
    // Override with CLI args if provided
    if let Some(port) = port_override {
        config.port = port;
    }

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(ServerError::InvalidConfig(e).into());
    }

    let store = Arc::new(ChatStore::seeded());
    info!(chats = store.chats().len(), "Chat snapshot loaded");

    let mut state = AppState::new(&config, store);
    if config.metrics_enabled {
        state = state.with_metrics(metrics::install_recorder()?);
    }

    let server = FrontDoor::new(config, state).start().await.map_err(|e| {
        error!("Failed to start server: {}", e);
        e
    })?;

    server.run_until_shutdown().await?;
    info!("Server stopped");

    Ok(())
}
