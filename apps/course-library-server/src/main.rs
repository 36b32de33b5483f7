mod config;
mod logging;
mod shutdown;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use course_library::CourseLibrary;
use sea_orm::Database;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::{AppConfig, CliOverrides};

/// Course Library Server - authors and courses REST API
#[derive(Parser)]
#[command(name = "course-library-server")]
#[command(about = "Course Library Server - authors and courses REST API")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use mock database (sqlite::memory:)
    #[arg(long)]
    mock: bool,

    /// Drop all tables and re-apply migrations before serving
    #[arg(long)]
    reset_db: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.config
        && !path.is_file()
    {
        anyhow::bail!("config file does not exist: {}", path.display());
    }

    // Layered config:
    // 1) defaults -> 2) YAML (if provided) -> 3) env (APP__*) -> 4) CLI overrides
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(&CliOverrides {
        port: cli.port,
        verbose: cli.verbose,
        mock: cli.mock,
    });

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    logging::init(&config.logging);
    tracing::info!("Course Library Server starting");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, cli.reset_db).await,
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    CourseLibrary::validate_config(&config.course_library)?;
    println!("Configuration is valid");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn run_server(config: AppConfig, reset_db: bool) -> Result<()> {
    tracing::info!(dsn = %config.database.dsn, "Connecting to database");
    let db = Database::connect(&config.database.dsn)
        .await
        .with_context(|| format!("failed to connect to {}", config.database.dsn))?;

    let module = CourseLibrary::new(db, config.course_library.clone())?;
    if reset_db {
        module.reset().await?;
    } else {
        module.migrate().await?;
    }

    let app = module.router().layer(TraceLayer::new_for_http());
    let listener = TcpListener::bind(config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    tracing::info!(addr = %listener.local_addr()?, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::shutdown_signal())
        .await?;

    tracing::info!("Course Library Server stopped");
    Ok(())
}
