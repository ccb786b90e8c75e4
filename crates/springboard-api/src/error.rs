//! API gateway error types.

use thiserror::Error;

/// Error type for API gateway operations.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server returned 401; the local session has been cleared.
    #[error("Session expired. Please sign in again.")]
    SessionExpired,

    /// The wallet has a valid signature but no account (verify said
    /// 404 / "No account found"). Not a failure: the caller should
    /// move to the registration flow.
    #[error("No account found. Registration required.")]
    RegistrationRequired,

    /// Any other non-2xx response, carrying the server's message.
    #[error("{message}")]
    RequestFailed { status: u16, message: String },

    /// The body was not JSON, or did not match the expected shape.
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Transport-level failure (connection refused, TLS, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Session store failure while reading or clearing the token.
    #[error("Storage error: {0}")]
    Storage(#[from] springboard_storage::StorageError),
}

impl ApiError {
    /// The HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::SessionExpired => Some(401),
            ApiError::RegistrationRequired => Some(404),
            ApiError::RequestFailed { status, .. } => Some(*status),
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Best human-readable message for the error field of the auth
    /// layer: the server's message verbatim when available.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::RequestFailed { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type alias using ApiError.
pub type ApiResult<T> = Result<T, ApiError>;
