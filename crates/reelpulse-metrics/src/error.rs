use thiserror::Error;

/// Errors returned by the dashboard API client.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Network or TLS failure, or a non-2xx status from the dashboard API.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not match the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid dashboard API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
