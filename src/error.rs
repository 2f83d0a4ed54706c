//! Error types for the financial dashboard client

use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Classified failure of a backend call.
///
/// Produced only by the gateway; callers map variants to UI or navigation
/// actions. None of these are fatal to the process and none are retried
/// automatically.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {

    // =============================
    // Classified Backend Failures
    // =============================

    /// The backend requires the user to complete an external login flow
    /// before data can be served. Recovery is a redirect to `login_url`.
    #[error("Authentication required, login at: {login_url}")]
    AuthRequired { login_url: String },

    /// The server rejected the session id, regardless of status code.
    #[error("Invalid session: {0}")]
    InvalidSession(String),

    /// Any other non-2xx response, with the server-provided message or a
    /// generic fallback keyed by status code.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// No response was received at all (connect failure, timeout, etc.).
    #[error("Transport error: {0}")]
    Transport(String),

    // =============================
    // Local Failures
    // =============================

    /// A 2xx response body that could not be decoded into the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl GatewayError {
    /// HTTP status associated with this failure; transport failures report 0,
    /// matching the convention for "no response received".
    pub fn status(&self) -> u16 {
        match self {
            GatewayError::AuthRequired { .. } => 401,
            GatewayError::InvalidSession(_) => 401,
            GatewayError::Http { status, .. } => *status,
            GatewayError::Transport(_) => 0,
            GatewayError::MalformedResponse(_) => 0,
        }
    }

    /// Whether the legitimate recovery path is an external login redirect.
    pub fn is_auth_required(&self) -> bool {
        matches!(self, GatewayError::AuthRequired { .. })
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(e: serde_json::Error) -> Self {
        GatewayError::MalformedResponse(e.to_string())
    }
}
