//! API server handler

use crate::api::serve_api;
use crate::AppConfig;
use crate::Result;

pub async fn handle_serve_api(
    config: &AppConfig,
    host: Option<String>,
    port: Option<u16>,
    cors: Option<bool>,
) -> Result<()> {
    let mut config = config.clone();
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(cors) = cors {
        config.server.enable_cors = cors;
    }

    println!("🚀 Starting Real Estate RAG API Server");
    println!("======================================\n");
    println!("📍 Host: {}", config.server.host);
    println!("🔌 Port: {}", config.server.port);
    println!(
        "🌐 CORS: {}",
        if config.server.enable_cors {
            "Enabled"
        } else {
            "Disabled"
        }
    );
    println!("🗄️  Database: {}", config.database.url);
    println!("🧭 Index: {}", config.index.path);
    println!("🤖 Models: {}", config.llm.models.join(", "));
    if !config.has_api_key() {
        println!(
            "⚠️  No Gemini API key configured; set {} before searching",
            crate::config::API_KEY_ENV
        );
    }
    println!();

    serve_api(&config).await
}
