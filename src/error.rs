//! Error types for cvsparse.
//!
//! Uses thiserror for derive macros. Unrecognized log lines are never an
//! error (they are message content); only numeric fields that cannot be
//! interpreted abort a parse pass.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for cvsparse operations.
#[derive(Error, Debug)]
pub enum CvsError {
    /// A date, time, or line count in the log could not be interpreted.
    #[error("malformed log input at line {line}: {message}")]
    Format { line: usize, message: String },

    /// User provided invalid arguments or configuration.
    #[error("{0}")]
    UserError(String),

    /// Reading the log or writing events failed.
    #[error("I/O failure: {0}")]
    Io(String),

    /// The key-value cache could not be read, written, or decoded.
    #[error("cache failure: {0}")]
    Cache(String),
}

impl CvsError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            CvsError::Format { .. } => exit_codes::FORMAT_ERROR,
            CvsError::UserError(_) => exit_codes::USER_ERROR,
            CvsError::Io(_) => exit_codes::IO_FAILURE,
            CvsError::Cache(_) => exit_codes::CACHE_FAILURE,
        }
    }
}

/// Result type alias for cvsparse operations.
pub type Result<T> = std::result::Result<T, CvsError>;
