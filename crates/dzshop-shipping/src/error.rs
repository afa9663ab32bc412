use thiserror::Error;

/// Errors returned by the zone repository.
///
/// `Clone` because a single in-flight fetch hands its outcome — success or
/// failure — to every caller that piled onto it, so the network error is
/// carried as a message rather than the non-cloneable `reqwest::Error`.
#[derive(Debug, Clone, Error)]
pub enum ShippingError {
    /// Network-level failure reaching the zones endpoint.
    #[error("shipping zones fetch failed: {0}")]
    Fetch(String),

    /// The zones endpoint answered with a non-2xx status.
    #[error("shipping zones endpoint returned HTTP {0}")]
    Status(u16),

    /// The envelope arrived with `success: false`.
    #[error("shipping zones endpoint returned an error envelope")]
    Api,

    /// The response body could not be decoded as a zones envelope.
    #[error("shipping zones response could not be decoded: {0}")]
    Deserialize(String),
}

impl From<reqwest::Error> for ShippingError {
    fn from(err: reqwest::Error) -> Self {
        ShippingError::Fetch(err.to_string())
    }
}
