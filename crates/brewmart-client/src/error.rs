use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by {host} (retry after {retry_after_secs}s)")]
    RateLimited { host: String, retry_after_secs: u64 },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("normalization error for product {product_id}: {reason}")]
    Normalization { product_id: String, reason: String },

    #[error("invalid API base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl ClientError {
    /// HTTP status carried by this error, if the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::RateLimited { .. } => Some(429),
            ClientError::NotFound { .. } => Some(404),
            ClientError::UnexpectedStatus { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            ClientError::Deserialize { .. }
            | ClientError::Normalization { .. }
            | ClientError::InvalidBaseUrl { .. } => None,
        }
    }
}
