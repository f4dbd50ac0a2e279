mod config;
mod cors;
mod db;
mod logging;
mod server;
mod signals;

use std::path::PathBuf;

use anyhow::Result;
use buycut::BuycutModule;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use crate::config::{AppConfig, CliOverrides};

/// Buycut Server - consumer boycott registry
#[derive(Parser)]
#[command(name = "buycut-server")]
#[command(about = "Buycut Server - consumer boycott registry")]
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

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
    /// Apply database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Layered config:
    // 1) defaults -> 2) YAML (if provided) -> 3) env (APP__*) -> 4) CLI overrides
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(CliOverrides {
        port: cli.port,
        verbose: cli.verbose,
        mock: cli.mock,
    })?;

    if cli.print_config {
        println!("Effective configuration:\n{}", config.to_yaml()?);
        return Ok(());
    }

    logging::init(&config.logging)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Buycut Server starting");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(&config).await,
        Commands::Check => check_config(&config),
        Commands::Migrate => migrate(&config).await,
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    config.validate()?;
    println!("Configuration is valid");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn migrate(config: &AppConfig) -> Result<()> {
    let db = db::connect(&config.database).await?;
    BuycutModule::migrate(&db).await
}

async fn run_server(config: &AppConfig) -> Result<()> {
    config.validate()?;

    let db = db::connect(&config.database).await?;
    BuycutModule::migrate(&db).await?;
    let module = BuycutModule::new(&db, &config.buycut)?;

    let cancel = CancellationToken::new();
    let health = module.spawn_health_job(cancel.child_token());

    let app = server::build_app(module.router(), &config.server);

    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = signals::wait_for_shutdown().await {
            tracing::error!(error = %e, "Signal handling failed, shutting down");
        }
        on_signal.cancel();
    });

    let served = server::serve(app, &config.server.bind_addr, cancel.child_token()).await;
    cancel.cancel();

    if let Some(job) = health {
        job.await?;
    }
    db.close().await?;
    tracing::info!("Buycut Server stopped");
    served
}
