//! # Client Errors
//!
//! Error types for backend round trips.

use thiserror::Error;

/// Result type for backend operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Backend round-trip errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    // ==================
    // Transport Errors
    // ==================
    /// Request never produced a response (connect failure, timeout, reset)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body was not the JSON shape the endpoint promises
    #[error("Malformed response: {0}")]
    Decode(String),

    // ==================
    // Application Errors
    // ==================
    /// Backend answered `success: false`; carries its message verbatim
    #[error("{0}")]
    Application(String),
}

impl ClientError {
    /// Transport and decode failures are reported with a generic message;
    /// only application errors are shown verbatim.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_) | ClientError::Decode(_))
    }

    /// Short machine-readable kind, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            ClientError::Transport(_) => "transport",
            ClientError::Decode(_) => "decode",
            ClientError::Application(_) => "application",
        }
    }

    /// Message to show the user, given the operation's generic transport
    /// message and the prefix for server-reported errors
    pub fn user_message(&self, prefix: &str, transport_message: &str) -> String {
        match self {
            ClientError::Application(message) => format!("{}{}", prefix, message),
            _ => transport_message.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}
