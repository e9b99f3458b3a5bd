//! Error types for layout configuration.

use thiserror::Error;

/// Primary error type for layout operations.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// A geometric dimension was out of range.
    #[error("invalid label geometry")]
    InvalidGeometry {
        /// Field that failed validation.
        field: &'static str,
        /// Offending value in points (or inches for inch-based constructors).
        value: f32,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
    /// A typography setting was out of range.
    #[error("invalid typography")]
    InvalidTypography {
        /// Field that failed validation.
        field: &'static str,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
    /// Host paper name was not recognised.
    #[error("unknown host paper")]
    UnknownPaper {
        /// Paper name provided by the caller.
        value: String,
    },
    /// Scale mode name was not recognised.
    #[error("unknown scale mode")]
    UnknownScaleMode {
        /// Scale mode provided by the caller.
        value: String,
    },
}

/// Convenience alias for layout results.
pub type LayoutResult<T> = Result<T, LayoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_constant() {
        let err = LayoutError::InvalidGeometry {
            field: "width",
            value: -1.0,
            reason: "must be positive",
        };
        assert_eq!(err.to_string(), "invalid label geometry");

        let err = LayoutError::UnknownPaper {
            value: "Tabloid".to_string(),
        };
        assert_eq!(err.to_string(), "unknown host paper");
    }
}
