//! Error types for the data access layer.

use thiserror::Error;

/// Result alias for data layer operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors raised by the data access layer.
#[derive(Debug, Error)]
pub enum DataError {
    /// Migration execution failed.
    #[error("migration failed")]
    MigrationFailed {
        /// Underlying migration error.
        source: sqlx::migrate::MigrateError,
    },
    /// A database operation failed.
    #[error("database operation failed")]
    QueryFailed {
        /// Operation identifier.
        operation: &'static str,
        /// Underlying SQL error.
        source: sqlx::Error,
    },
    /// A built-in matching pattern failed to compile.
    #[error("code pattern failed to compile")]
    PatternInvalid {
        /// Pattern identifier.
        pattern: &'static str,
        /// Underlying regex error.
        source: regex::Error,
    },
    /// Another record already uses the name (compared case-insensitively).
    #[error("label name already exists")]
    DuplicateName {
        /// Name that collided.
        name: String,
    },
    /// No record has the identifier a write targeted.
    #[error("label not found")]
    NotFound {
        /// Operation that performed the write.
        operation: &'static str,
        /// Identifier that was targeted.
        key: String,
    },
    /// A field failed validation before reaching the database.
    #[error("invalid label input")]
    InvalidInput {
        /// Field that failed validation.
        field: &'static str,
        /// Static reason for the failure.
        reason: &'static str,
    },
}

impl DataError {
    pub(crate) const fn query(operation: &'static str, source: sqlx::Error) -> Self {
        Self::QueryFailed { operation, source }
    }

    /// Whether the error was caused by caller input rather than the database.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateName { .. } | Self::NotFound { .. } | Self::InvalidInput { .. }
        )
    }
}

impl From<sqlx::Error> for DataError {
    fn from(source: sqlx::Error) -> Self {
        Self::query("sqlx operation", source)
    }
}
