use querycount_core::error::CoreError;
use querycount_db::DbError;

/// Anything that stops a check from producing a verdict.
///
/// Every variant is reported as UNKNOWN; none of them is retried.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// Bad `--query` input, found before any network call.
    #[error(transparent)]
    Usage(#[from] CoreError),

    /// Flags that cannot be combined into a connection.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Connection, authentication, TLS or query failure.
    #[error(transparent)]
    Database(#[from] DbError),

    #[error("Failed to write results: {0}")]
    Output(#[from] std::io::Error),
}
