use async_trait::async_trait;
use thiserror::Error;

/// Execution failed for the attempted statement. The runner treats every
/// variant uniformly; the split exists so adapters can surface a precise
/// message.
#[derive(Debug, Clone, Error)]
pub enum ExecutorError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Command not found: {0}")]
    CommandNotFound(String),
    #[error("Operation timed out")]
    Timeout,
}

/// The capability that actually runs SQL. Real adapters delegate to a
/// database; test doubles return fixed row counts or raise fixed errors.
/// Any transaction scope is owned by the implementor, not the runner.
#[async_trait]
pub trait ScriptExecutor: Send + Sync {
    /// Execute one statement and report the number of rows affected.
    async fn execute(&self, query: &str) -> Result<u64, ExecutorError>;
}
