use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from file: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Unknown preset '{0}' (available: conservative, moderate, aggressive)")]
    UnknownPreset(String),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}
