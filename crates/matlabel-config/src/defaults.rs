//! Default values shared by the configuration models.
//!
//! # Design
//! - Physical dimensions are kept in inches, the unit the label stock is sold in.
//! - Typography defaults mirror `matlabel_layout::Typography::default()`.

/// Default SQLite database location, created on first use.
pub(crate) const DATABASE_URL: &str = "sqlite://labels.db?mode=rwc";
/// Label content width in inches.
pub(crate) const LABEL_WIDTH_IN: f32 = 4.0;
/// Label content height in inches.
pub(crate) const LABEL_HEIGHT_IN: f32 = 6.0;
/// Margin around the description block in inches.
pub(crate) const LABEL_MARGIN_IN: f32 = 0.25;
/// Horizontal inset of the code line in inches.
pub(crate) const CODE_SIDE_MARGIN_IN: f32 = 0.08;
/// Host page margin in inches.
pub(crate) const HOST_MARGIN_IN: f32 = 0.25;
/// Host paper name.
pub(crate) const HOST_PAPER: &str = "Letter";
/// Default log filter.
pub(crate) const LOG_LEVEL: &str = "info";
