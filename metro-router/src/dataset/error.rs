//! Dataset retrieval error types.

/// Errors that can occur when fetching or caching the station dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not a GeoJSON feature collection
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Cache operation failed
    #[error("cache error: {message}")]
    Cache { message: String },
}
