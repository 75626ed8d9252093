use thiserror::Error;

#[derive(Error, Debug)]
pub enum EstateRagError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid price filter: min_price {min} is greater than max_price {max}")]
    InvalidFilter { min: i64, max: i64 },

    #[error("Property {0} not found")]
    PropertyNotFound(String),

    #[error("No route for {0}")]
    RouteNotFound(String),

    #[error("Method {method} is not allowed on {path}")]
    MethodNotAllowed { method: String, path: String },

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Generation quota exhausted for model {model}, try again later")]
    RateLimited { model: String },

    #[error("Model {model} returned output that does not match the answer schema: {message}")]
    GenerationParse { model: String, message: String },

    #[error("Generation provider unavailable: {0}")]
    GenerationUnavailable(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Vector index error: {0}")]
    VectorIndex(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialization(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Custom(String),
}

pub type Result<T> = std::result::Result<T, EstateRagError>;
