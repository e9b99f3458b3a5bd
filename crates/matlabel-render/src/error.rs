//! # Design
//!
//! - Constant error messages; the failing operation and path travel as fields.
//! - Source errors are preserved for callers that want the full chain.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors produced while rendering or writing a label document.
#[derive(Debug, Error)]
pub enum RenderError {
    /// IO failures while writing the document.
    #[error("render io failure")]
    Io {
        /// Operation that triggered the IO failure.
        operation: &'static str,
        /// Path involved in the IO failure.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// Label content that cannot be rendered.
    #[error("render invalid input")]
    InvalidInput {
        /// Field that failed validation.
        field: &'static str,
        /// Static reason for the failure.
        reason: &'static str,
        /// Offending value when available.
        value: Option<String>,
    },
}

impl RenderError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}
