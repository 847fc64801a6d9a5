//! Error types for generative drafts

use thiserror::Error;

/// Errors from the generative text provider
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AiError {
    /// No key in the config file or the environment
    #[error("No API key configured (set ai.api_key or VITE_API_KEY)")]
    MissingApiKey,

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response had no text candidates
    #[error("API returned no content")]
    EmptyResponse,

    /// A structured response did not match the expected shape
    #[error("Malformed generated post: {0}")]
    MalformedPost(#[from] serde_json::Error),
}

/// Result type alias for generative operations
pub type Result<T> = std::result::Result<T, AiError>;
