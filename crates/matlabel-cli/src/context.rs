//! Shared error types, application context, and error translation for the CLI.

use std::fmt::{self, Display, Formatter};

use anyhow::anyhow;
use matlabel_config::{AppConfig, ConfigError};
use matlabel_data::{DataError, LabelRecord, LabelStore};
use matlabel_layout::{HostPaper, HostSetup, LabelLayout, ScaleMode};
use matlabel_render::RenderError;
use tracing::debug;

use crate::cli::OutputFormat;

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

impl From<DataError> for CliError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::DuplicateName { name } => {
                Self::validation(format!("a label named '{name}' already exists"))
            }
            DataError::NotFound { key, .. } => Self::validation(format!("label {key} not found")),
            DataError::InvalidInput { field, reason } => {
                Self::validation(format!("invalid {field}: {reason}"))
            }
            other => Self::failure(other),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidField {
                section,
                field,
                value,
                reason,
            } => {
                let shown = value.map(|value| format!(" (got '{value}')")).unwrap_or_default();
                Self::validation(format!(
                    "invalid configuration {section}.{field}: {reason}{shown}"
                ))
            }
            ConfigError::Io { path, source, .. } => Self::validation(format!(
                "failed to read configuration {}: {source}",
                path.display()
            )),
            ConfigError::Parse { path, source } => Self::validation(format!(
                "configuration {} is malformed: {source}",
                path.display()
            )),
        }
    }
}

impl From<RenderError> for CliError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::InvalidInput { reason, .. } => Self::validation(reason),
            io @ RenderError::Io { .. } => Self::failure(io),
        }
    }
}

/// Application context passed to command handlers.
#[derive(Debug, Clone)]
pub(crate) struct AppContext {
    pub(crate) config: AppConfig,
    pub(crate) output: OutputFormat,
}

impl AppContext {
    /// Open the label store named by the configuration.
    pub(crate) async fn store(&self) -> CliResult<LabelStore> {
        let url = &self.config.database.url;
        debug!(database_url = %url, "opening label store");
        LabelStore::connect(url).await.map_err(CliError::from)
    }

    /// Layout engine built from the label and typography settings.
    pub(crate) fn layout(&self) -> CliResult<LabelLayout> {
        self.config.layout().map_err(CliError::from)
    }

    /// Host page settings with command-line overrides applied.
    pub(crate) fn host_setup(
        &self,
        paper: Option<&str>,
        scale: Option<ScaleMode>,
    ) -> CliResult<HostSetup> {
        let mut setup = self.config.host_setup()?;
        if let Some(name) = paper {
            setup.paper = HostPaper::from_name_or_letter(name);
        }
        if let Some(scale) = scale {
            setup.scale = scale;
        }
        Ok(setup)
    }
}

/// Look a label up by code, normalising `VG100`/`VG0100` style variants.
pub(crate) async fn require_label(store: &LabelStore, code: &str) -> CliResult<LabelRecord> {
    store
        .find_by_code(code)
        .await?
        .ok_or_else(|| CliError::validation(format!("label '{}' not found", code.trim())))
}

pub(crate) fn json_text<T: serde::Serialize>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))
}
