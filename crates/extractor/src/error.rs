use connectors::error::DbError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading or parsing configuration files.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),
}

/// Errors surfaced by the query executor.
///
/// Backend and transport failures pass through unmodified; nothing here
/// retries or rewrites messages.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The base query time did not match the configured time format.
    #[error("Failed to parse query time: {0}")]
    TimeParse(#[from] chrono::ParseError),

    /// Database-layer failure, raised as the client reported it.
    #[error("Database error: {0}")]
    Db(#[from] DbError),

    /// Configuration could not be loaded.
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}
