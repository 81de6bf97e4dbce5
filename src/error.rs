// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for the QR factorization server.

use thiserror::Error;

/// Server error type.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ServerError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid matrix shape.
    #[error("{0}")]
    InvalidMatrix(String),

    /// QR factorization failure.
    #[error("factorization error: {0}")]
    Factorization(String),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Downstream statistics service error.
    #[error("statistics error: {0}")]
    Statistics(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;
