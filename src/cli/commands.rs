//! CLI command definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

use crate::rag::pipeline::DEFAULT_K_RESULTS;
use crate::rag::pipeline::DEFAULT_TEMPERATURE;

#[derive(Parser)]
#[command(name = "estate-rag")]
#[command(about = "Real-estate property search with retrieval-augmented generation")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: info level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file; missing files fall back to defaults
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind (overrides server.host)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
        /// Enable or disable permissive CORS (overrides server.enable_cors)
        #[arg(long)]
        cors: Option<bool>,
    },
    /// Run a full RAG search and print the structured answer
    Ask {
        /// Natural-language property query
        query: String,
        /// Number of listings to retrieve
        #[arg(short, long, default_value_t = DEFAULT_K_RESULTS)]
        k: usize,
        /// Sampling temperature
        #[arg(short, long, default_value_t = DEFAULT_TEMPERATURE)]
        temperature: f32,
        /// Explicit lower price bound in INR
        #[arg(long)]
        min_price: Option<i64>,
        /// Explicit upper price bound in INR
        #[arg(long)]
        max_price: Option<i64>,
        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },
    /// Vector search only, without generation
    Search {
        /// Natural-language property query
        query: String,
        /// Number of listings to retrieve
        #[arg(short, long, default_value_t = DEFAULT_K_RESULTS)]
        k: usize,
    },
    /// Create the property database schema if missing
    InitDb,
    /// Print the effective configuration with secrets masked
    Config,
}
