//! Error types for the meeting client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Meeting ID or user identity cannot be used
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The server refused the WebSocket upgrade
    #[error("Server rejected the connection: {0}")]
    Rejected(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

/// Outbound event could not be handed to the transport
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("Channel is closed")]
    Closed,
}

/// Capture request failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("No capture device available: {0}")]
    Unavailable(String),
}
