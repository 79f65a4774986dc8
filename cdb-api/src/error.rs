/// Error types for the dashboard API client
use thiserror::Error;

/// Main error type for backend calls
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced an HTTP response
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// The backend answered with a non-success status
    #[error("HTTP {status} from {url}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// The body was not the JSON shape the endpoint promises
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The body decoded but violates the endpoint contract
    #[error("unexpected response from {url}: {message}")]
    Shape { url: String, message: String },

    /// The caller asked for something the API cannot express
    #[error("invalid request: {0}")]
    InvalidInput(String),
}

impl ApiError {
    /// The message to show an operator.
    ///
    /// For status errors the backend usually sends `{"detail": "..."}`; that
    /// text is preferred over the raw body.
    pub fn detail(&self) -> String {
        match self {
            ApiError::Status { status, body, .. } => {
                match serde_json::from_str::<crate::models::ErrorDetail>(body) {
                    Ok(detail) => detail.detail,
                    Err(_) if body.trim().is_empty() => format!("HTTP {}", status),
                    Err(_) => body.clone(),
                }
            }
            ApiError::Transport { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Type alias for Results using ApiError
pub type Result<T> = std::result::Result<T, ApiError>;
