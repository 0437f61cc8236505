use thiserror::Error;

/// All errors coming from the database/query layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// Low-level I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport-level failure reaching the backend.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the query; carries the backend's own message.
    #[error("Query rejected ({status}): {message}")]
    Query { status: u16, message: String },

    /// The backend response could not be decoded.
    #[error("Response decode error: {0}")]
    Decode(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Errors happening during client or connection setup.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Reading the connection settings file failed.
    #[error("Failed to read connection settings: {0}")]
    Io(#[from] std::io::Error),

    /// The connection settings file could not be parsed.
    #[error("Failed to parse connection settings: {0}")]
    Toml(#[from] toml::de::Error),

    /// Building the HTTP client failed.
    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend did not answer the connectivity check.
    #[error("Could not connect to backend at {0}")]
    Unreachable(String),

    /// Ping itself failed at the database layer.
    #[error("Ping failed: {0}")]
    Ping(#[from] DbError),
}
