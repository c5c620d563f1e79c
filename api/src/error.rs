/// Failures raised while talking to the analysis service.
///
/// HTTP error statuses are *not* errors at this layer: any response that made it
/// back is handed to the caller as a [`crate::ServiceResponse`] for classification.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The configured base URL could not be parsed.
    #[error("Invalid analysis service URL `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The request never produced a response (DNS, refused connection, aborted body...).
    #[error("Request to the analysis service failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A response body could not be decoded into the expected shape.
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}
