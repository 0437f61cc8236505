use connectors::error::ConnectorError;
use extractor::error::{ExtractError, SettingsError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read or write a file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Connection error: {0}")]
    Connector(#[from] ConnectorError),

    #[error("Query failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("Invalid query time: {0}")]
    TimeParse(#[from] chrono::ParseError),

    #[error("Invalid time offset: {0}")]
    InvalidDelta(String),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),
}
