#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The `--query` text is not a JSON object.
    #[error("Failed to parse query. Provide a valid JSON object: {0}")]
    MalformedFilter(String),
}
