//! Typed configuration models.
//!
//! # Design
//! - Every field has a default so an empty document (or no file at all) is a
//!   complete configuration.
//! - Unknown keys are rejected when parsing to catch typos early.

use matlabel_layout::{Alignment, FontFace, ScaleMode};
use serde::{Deserialize, Serialize};

use crate::defaults;

/// Root configuration document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Label database settings.
    pub database: DatabaseConfig,
    /// Physical label dimensions.
    pub label: LabelConfig,
    /// Font sizes and spacing.
    pub typography: TypographyConfig,
    /// Host page used when not printing label-sized pages.
    pub host: HostConfig,
    /// Logging settings.
    pub telemetry: TelemetryConfig,
}

/// Label database settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// SQLite connection URL.
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: defaults::DATABASE_URL.to_string(),
        }
    }
}

/// Physical label content area, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelConfig {
    /// Content width.
    pub width_in: f32,
    /// Content height.
    pub height_in: f32,
    /// Margin around the description block.
    pub margin_in: f32,
    /// Horizontal inset on each side of the code line.
    pub code_side_margin_in: f32,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            width_in: defaults::LABEL_WIDTH_IN,
            height_in: defaults::LABEL_HEIGHT_IN,
            margin_in: defaults::LABEL_MARGIN_IN,
            code_side_margin_in: defaults::CODE_SIDE_MARGIN_IN,
        }
    }
}

/// Font sizes and spacing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypographyConfig {
    /// Face for the code and stamp.
    pub code_face: FontFace,
    /// Face for the description.
    pub description_face: FontFace,
    /// Largest code size tried.
    pub code_max: u16,
    /// Smallest code size.
    pub code_min: u16,
    /// Largest description size tried.
    pub description_max: u16,
    /// Smallest description size.
    pub description_min: u16,
    /// Baseline distance as a multiple of the description size.
    pub line_spacing: f32,
    /// Fraction of the label height where the description starts.
    pub description_top_fraction: f32,
    /// Code ascent as a fraction of its size.
    pub ascent_ratio: f32,
    /// Gap between a baseline and its underline, in points.
    pub underline_gap: f32,
    /// Underline stroke width, in points.
    pub underline_stroke: f32,
    /// Description alignment.
    pub alignment: Alignment,
}

impl Default for TypographyConfig {
    fn default() -> Self {
        let typography = matlabel_layout::Typography::default();
        Self {
            code_face: typography.code_face,
            description_face: typography.description_face,
            code_max: typography.code_sizes.max,
            code_min: typography.code_sizes.min,
            description_max: typography.description_sizes.max,
            description_min: typography.description_sizes.min,
            line_spacing: typography.line_spacing,
            description_top_fraction: typography.description_top_fraction,
            ascent_ratio: typography.ascent_ratio,
            underline_gap: typography.underline_gap,
            underline_stroke: typography.underline_stroke,
            alignment: typography.alignment,
        }
    }
}

/// Host page settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    /// Paper name (`Letter` or `A4`); unknown names print on Letter.
    pub paper: String,
    /// Margin on every side, in inches.
    pub margin_in: f32,
    /// Scaling rule.
    pub scale: ScaleMode,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            paper: defaults::HOST_PAPER.to_string(),
            margin_in: defaults::HOST_MARGIN_IN,
            scale: ScaleMode::Fit,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TelemetryConfig {
    /// Log filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// `json` or `pretty`; unset picks by build profile.
    pub format: Option<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            format: None,
        }
    }
}
