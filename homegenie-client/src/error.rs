//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (transport-level)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error (local or 400 from the backend)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Attached image exceeds the inline-upload limit
    #[error("Image of {size} bytes exceeds the {limit} byte limit")]
    ImageTooLarge { size: usize, limit: usize },

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Short user-facing message for the transient notification channel.
    pub fn notice_message(&self) -> String {
        match self {
            ClientError::Http(_) => "Network error. Please try again.".to_string(),
            ClientError::Unauthorized => "Session expired. Please log in again.".to_string(),
            ClientError::ImageTooLarge { .. } => {
                "Image size should be less than 5MB".to_string()
            }
            ClientError::Forbidden(msg)
            | ClientError::NotFound(msg)
            | ClientError::Validation(msg)
            | ClientError::Internal(msg)
                if !msg.is_empty() =>
            {
                msg.clone()
            }
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }
}
