//! Error types for calcd
//!
//! Provides a unified error type for all operations.
//!
//! Request-level failures (bad arity, unknown operator, division by zero)
//! are not errors: they are answered with a status-coded response.

use thiserror::Error;

/// Result type alias using CalcError
pub type Result<T> = std::result::Result<T, CalcError>;

/// Unified error type for calcd operations
#[derive(Debug, Error)]
pub enum CalcError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Concurrency Errors
    // -------------------------------------------------------------------------
    #[error("Worker pool error: {0}")]
    Pool(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
