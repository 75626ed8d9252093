use anyhow::Result;
use clap::Parser;
use estate_rag::cli::handle_ask;
use estate_rag::cli::handle_config_command;
use estate_rag::cli::handle_init_db;
use estate_rag::cli::handle_search;
use estate_rag::cli::handle_serve_api;
use estate_rag::cli::Cli;
use estate_rag::cli::Commands;
use estate_rag::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::from_file(&cli.config)?;

    if matches!(cli.command, Commands::Serve { .. }) {
        estate_rag::logging::init_logging_with_config(&config, cli.verbose)?;
    } else {
        estate_rag::logging::init_simple_logging(cli.verbose)?;
    }
    tracing::debug!("Configuration loaded from {}", cli.config.display());

    match cli.command {
        Commands::Serve { host, port, cors } => {
            handle_serve_api(&config, host, port, cors).await?;
        }
        Commands::Ask {
            query,
            k,
            temperature,
            min_price,
            max_price,
            json,
        } => {
            handle_ask(&config, query, k, temperature, min_price, max_price, json).await?;
        }
        Commands::Search { query, k } => {
            handle_search(&config, query, k).await?;
        }
        Commands::InitDb => {
            handle_init_db(&config).await?;
        }
        Commands::Config => {
            handle_config_command(&config)?;
        }
    }

    Ok(())
}
