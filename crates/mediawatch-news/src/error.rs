use thiserror::Error;

/// Errors returned by the news API client.
#[derive(Debug, Error)]
pub enum NewsError {
    /// Network or TLS failure from the underlying HTTP client, or a non-2xx
    /// HTTP status (via `error_for_status`).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The base URL or a derived endpoint URL is not valid.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
