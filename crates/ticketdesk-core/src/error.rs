// Error types for spreadsheet access

use thiserror::Error;

/// Result type alias for SheetStore operations
pub type Result<T> = std::result::Result<T, SheetError>;

/// Errors raised while talking to the backing spreadsheet
#[derive(Debug, Clone, Error)]
pub enum SheetError {
    /// Credential or token exchange failure
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Transport failure before a response was received
    #[error("Request failed: {0}")]
    Transport(String),

    /// The provider answered with a non-success status
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The provider answered with a body we could not decode
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl SheetError {
    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        SheetError::Auth(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        SheetError::Transport(msg.into())
    }

    /// Create a provider API error
    pub fn api(status: u16, msg: impl Into<String>) -> Self {
        SheetError::Api {
            status,
            message: msg.into(),
        }
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        SheetError::Decode(msg.into())
    }

    /// HTTP status reported by the provider, if the failure came from one
    pub fn provider_status(&self) -> Option<u16> {
        match self {
            SheetError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
