//! Label layout engine: turns content into positioned text runs and rules.
//!
//! The plan is expressed in content coordinates (points, origin bottom-left)
//! so the same plan can be drawn on a label-sized page or under a host-page
//! transform.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::error::{LayoutError, LayoutResult};
use crate::fit::{ParagraphFit, fit_paragraph, fit_single_line};
use crate::metrics::{FontFace, StandardMetrics, TextMeasurer};
use crate::model::{Alignment, LabelContent, LabelGeometry, Typography};

/// Horizontal anchor of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    /// `x` is the centre of the run.
    Center,
    /// `x` is the left edge of the run.
    Left,
}

/// A single line of text with its position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    /// Text to draw.
    pub text: String,
    /// Face to draw it in.
    pub face: FontFace,
    /// Font size in points.
    pub size: u16,
    /// How `x` relates to the run.
    pub anchor: Anchor,
    /// Anchor position.
    pub x: f32,
    /// Baseline position.
    pub baseline: f32,
    /// Measured width of the run.
    pub width: f32,
}

impl TextRun {
    /// Left edge of the run.
    #[must_use]
    pub fn left(&self) -> f32 {
        match self.anchor {
            Anchor::Center => self.x - self.width / 2.0,
            Anchor::Left => self.x,
        }
    }

    /// Right edge of the run.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.left() + self.width
    }
}

/// A horizontal stroked line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rule {
    /// Start of the line.
    pub x1: f32,
    /// End of the line.
    pub x2: f32,
    /// Vertical position.
    pub y: f32,
    /// Stroke width.
    pub stroke: f32,
}

/// A text run with the rule drawn beneath it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnderlinedRun {
    /// The text.
    pub run: TextRun,
    /// Its underline.
    pub underline: Rule,
}

/// The wrapped description and where each line sits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptionBlock {
    /// Chosen size, wrapped lines, and overflow flag.
    pub fit: ParagraphFit,
    /// Height of the band the block was fitted into.
    pub band: f32,
    /// Positioned lines, top to bottom.
    pub runs: Vec<TextRun>,
}

/// Fully positioned label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelPlan {
    /// Content width.
    pub width: f32,
    /// Content height.
    pub height: f32,
    /// Underlined code at the top.
    pub code: UnderlinedRun,
    /// Optional underlined stamp below the code.
    pub stamp: Option<UnderlinedRun>,
    /// Description block.
    pub description: DescriptionBlock,
}

/// Drawing primitive borrowed from a plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawOp<'a> {
    /// Fill a text run.
    Text(&'a TextRun),
    /// Stroke a rule.
    Rule(&'a Rule),
}

impl LabelPlan {
    /// Drawing primitives in paint order.
    #[must_use]
    pub fn draw_ops(&self) -> Vec<DrawOp<'_>> {
        let mut ops = Vec::with_capacity(4 + self.description.runs.len());
        ops.push(DrawOp::Text(&self.code.run));
        ops.push(DrawOp::Rule(&self.code.underline));
        if let Some(stamp) = &self.stamp {
            ops.push(DrawOp::Text(&stamp.run));
            ops.push(DrawOp::Rule(&stamp.underline));
        }
        ops.extend(self.description.runs.iter().map(DrawOp::Text));
        ops
    }
}

/// Layout engine bound to a geometry, typography, and text measurer.
#[derive(Clone)]
pub struct LabelLayout {
    geometry: LabelGeometry,
    typography: Typography,
    measurer: Arc<dyn TextMeasurer>,
}

impl fmt::Debug for LabelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelLayout")
            .field("geometry", &self.geometry)
            .field("typography", &self.typography)
            .finish_non_exhaustive()
    }
}

impl LabelLayout {
    /// Create an engine measuring with [`StandardMetrics`].
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] when the typography is invalid or leaves no
    /// vertical room for the description.
    pub fn new(geometry: LabelGeometry, typography: Typography) -> LayoutResult<Self> {
        typography.validate()?;
        let band = geometry.description_band(&typography);
        if band <= 0.0 {
            return Err(LayoutError::InvalidGeometry {
                field: "description_top_fraction",
                value: typography.description_top_fraction,
                reason: "description band is empty after the margin",
            });
        }
        Ok(Self {
            geometry,
            typography,
            measurer: Arc::new(StandardMetrics),
        })
    }

    /// Replace the text measurer.
    #[must_use]
    pub fn with_measurer(mut self, measurer: Arc<dyn TextMeasurer>) -> Self {
        self.measurer = measurer;
        self
    }

    /// Geometry in use.
    #[must_use]
    pub const fn geometry(&self) -> &LabelGeometry {
        &self.geometry
    }

    /// Typography in use.
    #[must_use]
    pub const fn typography(&self) -> &Typography {
        &self.typography
    }

    /// Measurer in use.
    #[must_use]
    pub fn measurer(&self) -> &dyn TextMeasurer {
        self.measurer.as_ref()
    }

    /// Largest code size that fits the code line.
    #[must_use]
    pub fn fit_code_size(&self, code: &str) -> u16 {
        fit_single_line(
            self.measurer(),
            code,
            self.typography.code_face,
            self.geometry.code_width(),
            self.typography.code_sizes,
        )
    }

    /// Wrap and size the description for the description band.
    #[must_use]
    pub fn fit_description(&self, description: &str) -> ParagraphFit {
        fit_paragraph(
            self.measurer(),
            description,
            self.typography.description_face,
            self.geometry.description_width(),
            self.geometry.description_band(&self.typography),
            self.typography.description_sizes,
            self.typography.line_spacing,
        )
    }

    /// Position everything on the label.
    #[must_use]
    pub fn plan(&self, content: &LabelContent) -> LabelPlan {
        let geometry = &self.geometry;
        let typography = &self.typography;
        let center_x = geometry.width / 2.0;

        let code_size = self.fit_code_size(&content.code);
        let ascent = typography.ascent_ratio * f32::from(code_size);
        let code_baseline = geometry.height - 1.0 - ascent;
        let code = self.underlined(&content.code, code_size, center_x, code_baseline);

        let stamp = content.stamp.map(|stamp| {
            let baseline = code.underline.y - (typography.underline_gap + ascent);
            self.underlined(stamp.text(), code_size, center_x, baseline)
        });

        let fit = self.fit_description(&content.description);
        let band = geometry.description_band(typography);
        let (anchor, x) = match typography.alignment {
            Alignment::Center => (Anchor::Center, center_x),
            Alignment::Left => (Anchor::Left, geometry.margin),
        };
        let top = geometry.description_top(typography);
        let mut baseline = top;
        let mut runs = Vec::with_capacity(fit.lines.len());
        for line in &fit.lines {
            runs.push(TextRun {
                text: line.clone(),
                face: typography.description_face,
                size: fit.size,
                anchor,
                x,
                baseline,
                width: self.measurer.text_width(
                    line,
                    typography.description_face,
                    f32::from(fit.size),
                ),
            });
            baseline -= fit.line_height;
        }

        debug!(
            code = %content.code,
            code_size,
            description_size = fit.size,
            lines = fit.lines.len(),
            overflow = fit.overflow,
            "label layout computed"
        );

        LabelPlan {
            width: geometry.width,
            height: geometry.height,
            code,
            stamp,
            description: DescriptionBlock { fit, band, runs },
        }
    }

    fn underlined(&self, text: &str, size: u16, center_x: f32, baseline: f32) -> UnderlinedRun {
        let face = self.typography.code_face;
        let width = self.measurer.text_width(text, face, f32::from(size));
        let half = width / 2.0;
        UnderlinedRun {
            run: TextRun {
                text: text.to_string(),
                face,
                size,
                anchor: Anchor::Center,
                x: center_x,
                baseline,
                width,
            },
            underline: Rule {
                x1: center_x - half,
                x2: center_x + half,
                y: baseline - self.typography.underline_gap,
                stroke: self.typography.underline_stroke,
            },
        }
    }
}
