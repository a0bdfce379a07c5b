use clap::Parser;
use kbrag::cli::handlers::*;
use kbrag::cli::output::print_error;
use kbrag::cli::Cli;
use kbrag::cli::Commands;
use kbrag::config::AppConfig;
use kbrag::Result;
use tracing::info;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::load()?,
    };
    config.validate()?;

    // Initialize logging
    if cli.verbose {
        config.logging.level = "debug".to_string();
        kbrag::logging::init_logging(&config.logging)?;
    } else if matches!(cli.command, Commands::Serve { .. }) {
        kbrag::logging::init_logging(&config.logging)?;
    } else {
        kbrag::logging::init_simple_logging()?;
    }
    info!("Configuration loaded successfully");

    match cli.command {
        Commands::Serve {
            host,
            port,
            no_cors,
        } => handle_serve(&mut config, host, port, no_cors).await,
        Commands::Ingest { url } => handle_ingest(&config, &url).await,
        Commands::Ask { query } => handle_ask(&config, &query).await,
        Commands::List { limit } => handle_list(&config, limit).await,
        Commands::Stats => handle_stats(&config).await,
        Commands::Config => handle_config(&config),
    }
}
