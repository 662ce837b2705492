//! Error types for rconsole
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using RconError
pub type Result<T> = std::result::Result<T, RconError>;

/// Unified error type for rconsole operations
#[derive(Debug, Error)]
pub enum RconError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Connection closed by peer: expected {expected} bytes, received {received}")]
    ConnectionClosed { expected: usize, received: usize },

    #[error("Client is not connected")]
    NotConnected,

    #[error("Timed out: {0}")]
    Timeout(String),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Log Errors
    // -------------------------------------------------------------------------
    #[error("Log file not found: {}", .0.display())]
    NotFound(PathBuf),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RconError {
    /// True for failures of the transport itself (as opposed to credential,
    /// framing, file or configuration problems).
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            RconError::Io(_)
                | RconError::Connection(_)
                | RconError::ConnectionClosed { .. }
                | RconError::NotConnected
                | RconError::Timeout(_)
        )
    }
}
