/// Errors from the hosted AI provider. None of these are retried.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// No API key configured; the remote path is disabled.
    #[error("AI provider is not configured (OPENAI_API_KEY is unset)")]
    NotConfigured,

    /// Reading the source image failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("AI provider error ({status}): {body}")]
    Api { status: u16, body: String },

    /// A response body or model answer was not the JSON we expected.
    #[error("Malformed AI response: {0}")]
    MalformedResponse(String),

    /// The provider answered successfully but produced no image.
    #[error("AI provider returned no image")]
    EmptyResult,
}

impl From<serde_json::Error> for RemoteError {
    fn from(e: serde_json::Error) -> Self {
        RemoteError::MalformedResponse(e.to_string())
    }
}
