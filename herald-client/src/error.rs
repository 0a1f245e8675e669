//! Error types for the Herald clients

use herald_core::domain::commit::RepoRefError;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the CI, hosting, or speech
/// services
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse a response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Job exists but has never completed a build
    #[error("Job {0} has no completed build")]
    NoCompletedBuild(String),

    /// Build action list carries no repository URL / revision entry
    #[error("Build actions for job {0} carry no repository revision data")]
    MissingRevision(String),

    /// Checkout URL could not be reduced to an owner/repository pair
    #[error(transparent)]
    InvalidRepoUrl(#[from] RepoRefError),

    /// Named profile is absent from the credentials file
    #[error("Unknown credential profile: {0}")]
    UnknownProfile(String),

    /// Speech response carried no audio payload
    #[error("Speech response contained no audio data")]
    NoAudio,

    /// Local filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }
}
