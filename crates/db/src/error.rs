/// Failures from the database layer.
///
/// None of these are retried; they propagate to the process boundary.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Connection, authentication, TLS or query failure reported by the driver.
    #[error("MongoDB error: {0}")]
    Driver(#[from] mongodb::error::Error),

    /// The filter parsed as JSON but is not valid MongoDB Extended JSON.
    #[error("Invalid filter for MongoDB: {0}")]
    InvalidFilter(String),
}
