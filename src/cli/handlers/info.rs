//! Configuration display handler

use crate::cli::output::print_warning;
use crate::AppConfig;
use crate::Result;

/// Handle `config`: print the effective configuration
pub fn handle_config_command(config: &AppConfig) -> Result<()> {
    println!("{}", config.to_redacted_toml()?);
    if !config.has_api_key() {
        print_warning(&format!(
            "No Gemini API key configured; set {}",
            crate::config::API_KEY_ENV
        ));
    }
    Ok(())
}
