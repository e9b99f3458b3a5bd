//! Label records and import outcomes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A stored label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelRecord {
    /// Surrogate identifier.
    pub id: i64,
    /// Unique code, compared case-insensitively.
    pub name: String,
    /// Free text, possibly spanning several lines.
    pub description: String,
    /// When the record was first stored.
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub(crate) struct LabelRow {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) created_at: DateTime<Utc>,
}

impl From<LabelRow> for LabelRecord {
    fn from(row: LabelRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

/// Counts produced by a bulk import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Rows inserted.
    pub added: usize,
    /// Rows whose name already existed, in the store or earlier in the batch.
    pub skipped: usize,
    /// Rows without a description.
    pub rejected: usize,
}

impl ImportReport {
    /// Rows considered, excluding blank lines.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.added + self.skipped + self.rejected
    }
}
