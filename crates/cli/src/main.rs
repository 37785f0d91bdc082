//! Circuitry CLI
//!
//! Main entry point for the circuitry command-line tool: retrieval-grounded
//! circuit generation over a local corpus of circuit description files.

mod commands;

use clap::{Parser, Subcommand};
use commands::{IndexCommand, QueryCommand, SearchCommand, StatusCommand};
use circuitry_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// Circuitry CLI - retrieval-grounded circuit generation
#[derive(Parser, Debug)]
#[command(name = "circuitry")]
#[command(about = "Retrieval-grounded circuit generation over a local corpus", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "CIRCUITRY_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "CIRCUITRY_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// Generative provider (groq, ollama)
    #[arg(short, long, global = true, env = "CIRCUITRY_PROVIDER")]
    provider: Option<String>,

    /// Generative model identifier
    #[arg(short, long, global = true, env = "CIRCUITRY_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build and persist the circuit index from a corpus directory
    Index(IndexCommand),

    /// Generate circuit text for a query, grounded on retrieved circuits
    Query(QueryCommand),

    /// Retrieve the most similar circuits without generation
    Search(SearchCommand),

    /// Report index health (row count, model, dimensions)
    Status(StatusCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from environment
    let config = AppConfig::load()?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.workspace,
        cli.config,
        cli.provider,
        cli.model,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("Circuitry CLI starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Generation provider: {}", config.generation.provider);
    tracing::debug!("Embedding provider: {}", config.embedding.provider);

    // Ensure .circuitry directory exists
    config.ensure_circuitry_dir()?;

    let command_name = match &cli.command {
        Commands::Index(_) => "index",
        Commands::Query(_) => "query",
        Commands::Search(_) => "search",
        Commands::Status(_) => "status",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Index(cmd) => cmd.execute(&config).await,
        Commands::Query(cmd) => cmd.execute(&config).await,
        Commands::Search(cmd) => cmd.execute(&config).await,
        Commands::Status(cmd) => cmd.execute(&config),
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
