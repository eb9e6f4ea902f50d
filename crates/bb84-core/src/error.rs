//! Error types for the core crate.

use thiserror::Error;

/// Errors produced while configuring or running a BB84 round.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QkdError {
    /// Caller supplied a value outside the accepted domain.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Requested qubit count exceeds the configured ceiling.
    #[error("Round of {requested} qubits exceeds the configured maximum of {max}")]
    TooManyQubits {
        /// Number of qubits asked for.
        requested: usize,
        /// Configured `max_qubits`.
        max: usize,
    },

    /// Configuration file or environment override could not be used.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Background round task panicked or was aborted before delivering.
    #[error("Round task failed: {0}")]
    TaskFailed(String),
}

/// Result type for BB84 operations.
pub type QkdResult<T> = Result<T, QkdError>;
