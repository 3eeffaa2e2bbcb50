//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection failure, timeout, or body could not be read
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Body is not a valid envelope, or a required payload is missing
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The endpoint answered `status: "error"`; message is endpoint text
    #[error("{0}")]
    Remote(String),

    /// Endpoint address could not be parsed
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Network failure or unparseable response
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::InvalidResponse(_))
    }

    /// Failure reported by the endpoint itself
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
