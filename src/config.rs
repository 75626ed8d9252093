use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

/// Environment variable holding the Gemini API credential.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Prefix for environment overrides, e.g. `ESTATE_RAG__SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "ESTATE_RAG";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
    /// Upper bound for a whole request, generation call included.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            enable_cors: true,
            request_timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://properties_sql.db".to_string(),
            max_connections: 8,
            connection_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub path: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            path: "realestate_index.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub endpoint: String,
    pub api_key: String,
    /// Generation models, used in round-robin order.
    pub models: Vec<String>,
    pub embedding_model: String,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta/".to_string(),
            api_key: String::new(),
            models: default_models(),
            embedding_model: "gemini-embedding-001".to_string(),
            timeout_secs: 90,
        }
    }
}

fn default_models() -> Vec<String> {
    vec![
        "gemini-2.5-flash".to_string(),
        "gemini-2.5-flash-lite".to_string(),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    pub max_chars: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self { max_chars: 12_000 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: "logs".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub index: IndexConfig,
    pub llm: LlmConfig,
    pub context: ContextConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file, then apply environment overrides.
    ///
    /// The file is optional; every field has a default.
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("llm.models")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: Self = settings.try_deserialize()?;
        config.apply_api_key_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default `config.toml`
    pub fn load() -> crate::Result<Self> {
        Self::from_file("config.toml")
    }

    fn apply_api_key_env(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.llm.api_key = key;
            }
        }
    }

    /// Reject configurations the service cannot run with.
    pub fn validate(&self) -> crate::Result<()> {
        if self.llm.models.is_empty() || self.llm.models.iter().any(|m| m.trim().is_empty()) {
            return Err(crate::EstateRagError::Custom(
                "llm.models must list at least one non-empty model name".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(crate::EstateRagError::Custom(
                "database.max_connections must be positive".to_string(),
            ));
        }
        if self.context.max_chars == 0 {
            return Err(crate::EstateRagError::Custom(
                "context.max_chars must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether a Gemini credential is configured
    pub fn has_api_key(&self) -> bool {
        !self.llm.api_key.trim().is_empty()
    }

    /// Render the effective configuration as TOML with the credential masked.
    pub fn to_redacted_toml(&self) -> crate::Result<String> {
        let mut redacted = self.clone();
        if redacted.has_api_key() {
            redacted.llm.api_key = "***".to_string();
        }
        Ok(toml::to_string_pretty(&redacted)?)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults_rotate_two_models() {
        let config = AppConfig::default();
        assert_eq!(
            config.llm.models,
            vec!["gemini-2.5-flash", "gemini-2.5-flash-lite"]
        );
        assert_eq!(config.server.port, 8000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AppConfig::from_file("definitely-not-here.toml").unwrap();
        assert_eq!(config.database.url, "sqlite://properties_sql.db");
        assert_eq!(config.context.max_chars, 12_000);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 9100\n\n[llm]\nmodels = [\"gemini-2.5-pro\"]"
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.llm.models, vec!["gemini-2.5-pro"]);
        assert_eq!(config.llm.embedding_model, "gemini-embedding-001");
    }

    #[test]
    fn test_empty_model_list_is_rejected() {
        let mut config = AppConfig::default();
        config.llm.models.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_redacted_toml_hides_key() {
        let mut config = AppConfig::default();
        config.llm.api_key = "secret-key-value".to_string();
        let rendered = config.to_redacted_toml().unwrap();
        assert!(!rendered.contains("secret-key-value"));
        assert!(rendered.contains("***"));
    }
}
