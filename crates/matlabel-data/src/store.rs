//! SQLite-backed label repository.
//!
//! # Design
//! - Uniqueness lives on `name_key`, the trimmed name after Unicode
//!   lowercasing (see [`name_key`]). The database enforces it and
//!   unique-constraint violations are surfaced as [`DataError::DuplicateName`].
//! - Case-insensitive matching folds in Rust; `SQLite` only folds ASCII.
//! - Every write trims its inputs first and rejects empty fields before any
//!   SQL runs.
//! - Bulk import and bulk delete each run inside one transaction.

use std::str::FromStr;

use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{debug, info};

use crate::bulk::{normalize_code, parse_bulk_lines};
use crate::error::{DataError, Result};
use crate::model::{ImportReport, LabelRecord, LabelRow};

const INSERT_LABEL: &str = r"
    INSERT INTO labels (name, name_key, description, created_at)
    VALUES (?1, ?2, ?3, ?4)
";

const INSERT_LABEL_IF_ABSENT: &str = r"
    INSERT OR IGNORE INTO labels (name, name_key, description, created_at)
    VALUES (?1, ?2, ?3, ?4)
";

const SELECT_ALL: &str = r"
    SELECT id, name, description, created_at
    FROM labels
    ORDER BY name_key ASC, id ASC
";

const SELECT_BY_NAME: &str = r"
    SELECT id, name, description, created_at
    FROM labels
    WHERE name_key = ?1
";

const SELECT_BY_ID: &str = r"
    SELECT id, name, description, created_at
    FROM labels
    WHERE id = ?1
";

const UPDATE_LABEL: &str = r"
    UPDATE labels
    SET name = ?2, name_key = ?3, description = ?4
    WHERE id = ?1
";

const DELETE_LABEL: &str = r"DELETE FROM labels WHERE id = ?1";

/// Database-backed repository for label records.
#[derive(Debug, Clone)]
pub struct LabelStore {
    pool: SqlitePool,
}

impl LabelStore {
    /// Wrap an existing pool, applying pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::MigrationFailed`] when the schema cannot be applied.
    pub async fn new(pool: SqlitePool) -> Result<Self> {
        let mut migrator = sqlx::migrate!("./migrations");
        migrator.set_ignore_missing(true);
        migrator
            .run(&pool)
            .await
            .map_err(|source| DataError::MigrationFailed { source })?;
        Ok(Self { pool })
    }

    /// Open (creating if needed) the database at `database_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the database cannot be opened,
    /// or migrations fail.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|source| DataError::query("parse_database_url", source))?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|source| DataError::query("connect", source))?;
        debug!(database_url, "label database opened");
        Self::new(pool).await
    }

    /// Access the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Insert a label and return its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::InvalidInput`] for blank fields,
    /// [`DataError::DuplicateName`] when the name exists, or
    /// [`DataError::QueryFailed`] on database failure.
    pub async fn add(&self, name: &str, description: &str) -> Result<i64> {
        let (name, description) = validate(name, description)?;
        let result = sqlx::query(INSERT_LABEL)
            .bind(name)
            .bind(name_key(name))
            .bind(description)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|source| map_write_error("add_label", name, source))?;
        let id = result.last_insert_rowid();
        info!(id, name, "label added");
        Ok(id)
    }

    /// Every label, ordered by name without regard to case.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::QueryFailed`] on database failure.
    pub async fn list_all(&self) -> Result<Vec<LabelRecord>> {
        let rows: Vec<LabelRow> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(|source| DataError::query("list_labels", source))?;
        Ok(rows.into_iter().map(LabelRecord::from).collect())
    }

    /// Look up a label by exact name, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::QueryFailed`] on database failure.
    pub async fn get_by_name(&self, name: &str) -> Result<Option<LabelRecord>> {
        let row: Option<LabelRow> = sqlx::query_as(SELECT_BY_NAME)
            .bind(name_key(name))
            .fetch_optional(&self.pool)
            .await
            .map_err(|source| DataError::query("get_label_by_name", source))?;
        Ok(row.map(LabelRecord::from))
    }

    /// Look up a label by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::QueryFailed`] on database failure.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<LabelRecord>> {
        let row: Option<LabelRow> = sqlx::query_as(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|source| DataError::query("get_label_by_id", source))?;
        Ok(row.map(LabelRecord::from))
    }

    /// Resolve an operator-typed code.
    ///
    /// Tries an exact name match first, then compares normalized codes
    /// (see [`normalize_code`]) and returns the first match in name order.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::QueryFailed`] on database failure or
    /// [`DataError::PatternInvalid`] when the code pattern cannot be built.
    pub async fn find_by_code(&self, query: &str) -> Result<Option<LabelRecord>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }
        if let Some(record) = self.get_by_name(query).await? {
            return Ok(Some(record));
        }
        let wanted = normalize_code(query)?;
        let mut found = None;
        for record in self.list_all().await? {
            if normalize_code(&record.name)? == wanted {
                found = Some(record);
                break;
            }
        }
        debug!(query, normalized = %wanted, found = found.is_some(), "normalized code lookup");
        Ok(found)
    }

    /// Labels whose name or description contains `query`, ignoring case.
    ///
    /// An empty query returns every label.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::QueryFailed`] on database failure.
    pub async fn filter(&self, query: &str) -> Result<Vec<LabelRecord>> {
        let needle = name_key(query);
        let labels = self.list_all().await?;
        if needle.is_empty() {
            return Ok(labels);
        }
        Ok(labels
            .into_iter()
            .filter(|record| {
                record.name.to_lowercase().contains(&needle)
                    || record.description.to_lowercase().contains(&needle)
            })
            .collect())
    }

    /// Replace the name and description of label `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::NotFound`] when no label has that identifier,
    /// [`DataError::InvalidInput`] for blank fields,
    /// [`DataError::DuplicateName`] when another label uses the name, or
    /// [`DataError::QueryFailed`] on database failure.
    pub async fn update(&self, id: i64, name: &str, description: &str) -> Result<()> {
        let (name, description) = validate(name, description)?;
        let result = sqlx::query(UPDATE_LABEL)
            .bind(id)
            .bind(name)
            .bind(name_key(name))
            .bind(description)
            .execute(&self.pool)
            .await
            .map_err(|source| map_write_error("update_label", name, source))?;
        if result.rows_affected() == 0 {
            return Err(DataError::NotFound {
                operation: "update_label",
                key: id.to_string(),
            });
        }
        info!(id, name, "label updated");
        Ok(())
    }

    /// Delete every listed label in one transaction.
    ///
    /// Returns the number of rows removed; unknown identifiers are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::QueryFailed`] on database failure; nothing is
    /// deleted in that case.
    pub async fn delete_by_ids(&self, ids: &[i64]) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|source| DataError::query("begin_delete", source))?;
        let mut removed = 0;
        for &id in ids {
            let result = sqlx::query(DELETE_LABEL)
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(|source| DataError::query("delete_label", source))?;
            removed += result.rows_affected();
        }
        tx.commit()
            .await
            .map_err(|source| DataError::query("commit_delete", source))?;
        info!(requested = ids.len(), removed, "labels deleted");
        Ok(removed)
    }

    /// Parse bulk text and insert every complete row in one transaction.
    ///
    /// Rows whose name already exists (including earlier in the same text)
    /// are skipped; rows without a description are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::QueryFailed`] on database failure; nothing is
    /// inserted in that case.
    pub async fn import_bulk(&self, text: &str) -> Result<ImportReport> {
        let entries = parse_bulk_lines(text);
        let mut report = ImportReport::default();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|source| DataError::query("begin_import", source))?;
        let created_at = Utc::now();
        for entry in &entries {
            if entry.description.is_empty() {
                debug!(line = entry.line, code = %entry.code, "bulk row has no description");
                report.rejected += 1;
                continue;
            }
            let result = sqlx::query(INSERT_LABEL_IF_ABSENT)
                .bind(&entry.code)
                .bind(name_key(&entry.code))
                .bind(&entry.description)
                .bind(created_at)
                .execute(&mut *tx)
                .await
                .map_err(|source| DataError::query("import_label", source))?;
            if result.rows_affected() == 0 {
                debug!(line = entry.line, code = %entry.code, "bulk row duplicates an existing name");
                report.skipped += 1;
            } else {
                report.added += 1;
            }
        }
        tx.commit()
            .await
            .map_err(|source| DataError::query("commit_import", source))?;
        info!(
            added = report.added,
            skipped = report.skipped,
            rejected = report.rejected,
            "bulk import finished"
        );
        Ok(report)
    }
}

/// Key that decides name uniqueness: trimmed, then lowercased with full
/// Unicode case mapping.
#[must_use]
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

fn validate<'a>(name: &'a str, description: &'a str) -> Result<(&'a str, &'a str)> {
    let name = name.trim();
    let description = description.trim();
    if name.is_empty() {
        return Err(DataError::InvalidInput {
            field: "name",
            reason: "name must not be empty",
        });
    }
    if description.is_empty() {
        return Err(DataError::InvalidInput {
            field: "description",
            reason: "description must not be empty",
        });
    }
    Ok((name, description))
}

fn map_write_error(operation: &'static str, name: &str, source: sqlx::Error) -> DataError {
    match &source {
        sqlx::Error::Database(db) if db.is_unique_violation() => DataError::DuplicateName {
            name: name.to_string(),
        },
        _ => DataError::query(operation, source),
    }
}
