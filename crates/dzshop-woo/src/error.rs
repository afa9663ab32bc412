use thiserror::Error;

/// Errors returned by the WooCommerce API client.
#[derive(Debug, Error)]
pub enum WooError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured store URL cannot be used as an API base.
    #[error("invalid store URL \"{url}\": {reason}")]
    InvalidStoreUrl { url: String, reason: String },
}
