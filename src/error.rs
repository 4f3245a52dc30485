//! Error types for vtcore.

use std::io;

/// Error type for vtcore operations.
#[derive(Debug, thiserror::Error)]
pub enum VtCoreError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The terminal was already shut down when the operation was attempted.
    #[error("terminal closed")]
    Closed,

    /// The runtime was started more than once.
    #[error("runtime already running")]
    AlreadyRunning,

    /// Malformed widget or layout state, e.g. a grid cell collision.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A terminal input sequence could not be decoded.
    ///
    /// Never surfaced to applications: the decoder converts this into
    /// `Key::Unknown` internally rather than failing (see [`crate::key_decoder`]).
    #[error("decoding error: {0}")]
    Decoding(String),

    /// Layout calculation failed.
    #[error("layout error: {0}")]
    Layout(String),

    /// A terminal mode transition failed for a reason other than I/O.
    #[error("terminal error: {0}")]
    Terminal(String),
}

/// Result type alias for vtcore operations.
pub type Result<T> = std::result::Result<T, VtCoreError>;
