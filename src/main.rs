use anyhow::Result;
use clap::Parser;
use transaction_guardian::{
    cli::{Cli, Commands},
    client::{GuardianClient, Layout, ScoreForm, TransactionInput, render},
    config, server,
};
use tracing::info;

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

fn init_tracing(default_level: &str) -> Result<()> {
    // Environment variable overrides the configured level
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string());

    validate_log_level(&log_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_new(&log_level)?)
        .with_writer(std::io::stderr)
        .json()
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve().await,
        Commands::Score {
            transaction,
            endpoint,
            layout,
        } => score(transaction.into_input(), &endpoint, layout).await,
    }
}

async fn serve() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_tracing(&config.server.logs.level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    info!(
        "Starting Transaction Guardian with log level: {}",
        config.server.logs.level
    );
    info!("Configuration loaded successfully");

    server::run(config).await?;

    Ok(())
}

async fn score(input: TransactionInput, endpoint: &str, layout: Layout) -> Result<()> {
    init_tracing("warn")?;

    let client = GuardianClient::new(endpoint);
    let mut form = ScoreForm::new(input);

    form.submit(&client).await?;
    println!("{}", render(&form, layout));

    Ok(())
}
