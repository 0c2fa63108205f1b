//! Session-level errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use cwrap_core::GenerationError;

/// Errors that can occur during session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A wrap request was rejected
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Writing the generated source failed
    #[error("failed to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SessionError {
    /// The generation error, if this is one.
    pub fn as_generation(&self) -> Option<&GenerationError> {
        match self {
            SessionError::Generation(err) => Some(err),
            SessionError::Io { .. } => None,
        }
    }
}
