use thiserror::Error;

/// Errors surfaced by the API client, the resource services and the list
/// controllers.
///
/// `Server` displays the backend's message verbatim so it can be shown in an
/// error banner as-is.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("Authentication required: no session token")]
    Unauthenticated,
    #[error("Admin access required (current role: {0})")]
    Forbidden(String),
    #[error("Network error: {0}")]
    Transport(String),
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("Unexpected response shape: {0}")]
    Decode(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Controller communication error: {0}")]
    ActorCommunicationError(String),
}

impl ApiError {
    /// HTTP status for server-reported errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for errors raised locally before any request was sent.
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Unauthenticated | ApiError::Forbidden(_))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
