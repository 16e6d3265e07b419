//! Generation Errors
//!
//! Error kinds raised while producing recipes. Each variant is created where
//! the failure happens, so callers can decide between fallback and
//! propagation without looking at message text.

use thiserror::Error;

/// Error type for recipe generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The completion endpoint answered with a non-success status.
    #[error("OpenRouter API error: {status} - {message}")]
    RemoteService { status: u16, message: String },

    /// The endpoint answered successfully but carried no usable content.
    #[error("No response from AI model")]
    EmptyResponse,

    /// The reply could not be decoded into recipe data.
    #[error("Failed to parse recipe data from AI response: {0}")]
    Parse(String),

    /// The request never produced a status (DNS, refused connection, reset).
    #[error("Request to AI model failed: {0}")]
    Transport(String),
}

impl GenerationError {
    /// Whether the orchestrator may answer with fallback recipes instead.
    ///
    /// Only a remote service failure is surfaced to the caller.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, GenerationError::RemoteService { .. })
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GenerationError::Parse(err.to_string())
        } else {
            GenerationError::Transport(err.to_string())
        }
    }
}
