use crate::error::DbError;
use async_trait::async_trait;
use model::records::row::RowData;

/// Capabilities a backend handle must expose to the query layer.
///
/// The extractor only ever needs to check reachability and to submit one
/// query string per call, so alternative backends can be substituted by
/// implementing these two operations.
#[async_trait]
pub trait DatabaseClient {
    /// Checks that the backend is reachable; `Ok(false)` means the backend
    /// answered but reported itself unhealthy.
    async fn ping(&self) -> Result<bool, DbError>;

    /// Submits a backend-native query and returns the raw rows.
    ///
    /// One network round-trip per call; no caching and no retries. Errors
    /// from the transport or the backend are surfaced unmodified.
    async fn query_rows(&self, query: &str) -> Result<Vec<RowData>, DbError>;
}
