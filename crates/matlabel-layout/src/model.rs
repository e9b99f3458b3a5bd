//! Label geometry, typography settings, and printable content.
//!
//! # Design
//! - All dimensions are PDF points (1/72 inch) with the origin at the bottom
//!   left of the content area.
//! - Inch-based constructors truncate to whole points, matching the fixed
//!   label stock the printers are calibrated for.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};
use crate::fit::SizeRange;
use crate::metrics::FontFace;

/// Points per inch.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Fixed physical content area of a label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelGeometry {
    /// Content width in points.
    pub width: f32,
    /// Content height in points.
    pub height: f32,
    /// Margin around the description block.
    pub margin: f32,
    /// Horizontal inset on each side of the code line.
    pub code_side_margin: f32,
}

impl LabelGeometry {
    /// Build a validated geometry from point dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidGeometry`] when a dimension is not finite,
    /// not positive, or when the margins leave no room for content.
    pub fn new(width: f32, height: f32, margin: f32, code_side_margin: f32) -> LayoutResult<Self> {
        require_positive("width", width)?;
        require_positive("height", height)?;
        require_non_negative("margin", margin)?;
        require_non_negative("code_side_margin", code_side_margin)?;
        if margin * 2.0 >= width || margin * 2.0 >= height {
            return Err(LayoutError::InvalidGeometry {
                field: "margin",
                value: margin,
                reason: "margins consume the whole content area",
            });
        }
        if code_side_margin * 2.0 >= width {
            return Err(LayoutError::InvalidGeometry {
                field: "code_side_margin",
                value: code_side_margin,
                reason: "code margins consume the whole content width",
            });
        }
        Ok(Self {
            width,
            height,
            margin,
            code_side_margin,
        })
    }

    /// Build a geometry from inch dimensions, truncated to whole points.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidGeometry`] under the same rules as
    /// [`LabelGeometry::new`].
    pub fn from_inches(
        width_in: f32,
        height_in: f32,
        margin_in: f32,
        code_side_margin_in: f32,
    ) -> LayoutResult<Self> {
        Self::new(
            whole_points(width_in),
            whole_points(height_in),
            whole_points(margin_in),
            whole_points(code_side_margin_in),
        )
    }

    /// Width available to the code line.
    #[must_use]
    pub fn code_width(&self) -> f32 {
        2.0f32.mul_add(-self.code_side_margin, self.width)
    }

    /// Wrapping width of the description block.
    #[must_use]
    pub fn description_width(&self) -> f32 {
        2.0f32.mul_add(-self.margin, self.width)
    }

    /// Baseline of the first description line.
    #[must_use]
    pub fn description_top(&self, typography: &Typography) -> f32 {
        self.height * typography.description_top_fraction
    }

    /// Vertical band the description block must fit into.
    #[must_use]
    pub fn description_band(&self, typography: &Typography) -> f32 {
        self.description_top(typography) - self.margin
    }
}

impl Default for LabelGeometry {
    /// 4in × 6in content with a 0.25in margin and 0.08in code inset.
    fn default() -> Self {
        Self {
            width: 288.0,
            height: 432.0,
            margin: 18.0,
            code_side_margin: 5.0,
        }
    }
}

fn whole_points(inches: f32) -> f32 {
    (inches * POINTS_PER_INCH).trunc()
}

fn require_positive(field: &'static str, value: f32) -> LayoutResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidGeometry {
            field,
            value,
            reason: "must be a positive number",
        })
    }
}

fn require_non_negative(field: &'static str, value: f32) -> LayoutResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidGeometry {
            field,
            value,
            reason: "must be zero or a positive number",
        })
    }
}

/// Horizontal alignment of description lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Centre every line on the content width.
    #[default]
    Center,
    /// Start every line at the margin.
    Left,
}

/// Font and spacing rules for a label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Typography {
    /// Face for the code and the stamp.
    pub code_face: FontFace,
    /// Face for the description block.
    pub description_face: FontFace,
    /// Code sizes searched largest first.
    pub code_sizes: SizeRange,
    /// Description sizes searched largest first.
    pub description_sizes: SizeRange,
    /// Baseline distance as a multiple of the description size.
    pub line_spacing: f32,
    /// Fraction of the content height where the description starts.
    pub description_top_fraction: f32,
    /// Ascent used to hang the code from the top edge, as a fraction of size.
    pub ascent_ratio: f32,
    /// Gap between a baseline and its underline, in points.
    pub underline_gap: f32,
    /// Underline stroke width, in points.
    pub underline_stroke: f32,
    /// Description alignment.
    pub alignment: Alignment,
}

impl Typography {
    /// Check ranges and ratios.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidTypography`] naming the first offending field.
    pub fn validate(&self) -> LayoutResult<()> {
        SizeRange::new("code_sizes", self.code_sizes.max, self.code_sizes.min)?;
        SizeRange::new(
            "description_sizes",
            self.description_sizes.max,
            self.description_sizes.min,
        )?;
        if !(self.line_spacing.is_finite() && self.line_spacing > 0.0) {
            return Err(LayoutError::InvalidTypography {
                field: "line_spacing",
                reason: "must be a positive number",
            });
        }
        if !(self.description_top_fraction > 0.0 && self.description_top_fraction <= 1.0) {
            return Err(LayoutError::InvalidTypography {
                field: "description_top_fraction",
                reason: "must be within (0, 1]",
            });
        }
        if !(self.ascent_ratio > 0.0 && self.ascent_ratio <= 1.0) {
            return Err(LayoutError::InvalidTypography {
                field: "ascent_ratio",
                reason: "must be within (0, 1]",
            });
        }
        if !(self.underline_gap.is_finite() && self.underline_gap >= 0.0) {
            return Err(LayoutError::InvalidTypography {
                field: "underline_gap",
                reason: "must be zero or a positive number",
            });
        }
        if !(self.underline_stroke.is_finite() && self.underline_stroke > 0.0) {
            return Err(LayoutError::InvalidTypography {
                field: "underline_stroke",
                reason: "must be a positive number",
            });
        }
        Ok(())
    }
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            code_face: FontFace::TimesBold,
            description_face: FontFace::TimesRoman,
            code_sizes: SizeRange { max: 220, min: 28 },
            description_sizes: SizeRange { max: 52, min: 28 },
            line_spacing: 1.22,
            description_top_fraction: 0.60,
            ascent_ratio: 0.80,
            underline_gap: 3.0,
            underline_stroke: 3.0,
            alignment: Alignment::Center,
        }
    }
}

/// Secondary state printed under the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stamp {
    /// Material is scrap.
    Scrap,
    /// Material is regrind.
    Regrind,
}

impl Stamp {
    /// Resolve operator toggles into a stamp. Regrind wins over scrap.
    #[must_use]
    pub const fn from_flags(scrap: bool, regrind: bool) -> Option<Self> {
        if regrind {
            Some(Self::Regrind)
        } else if scrap {
            Some(Self::Scrap)
        } else {
            None
        }
    }

    /// Text printed on the label.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Scrap => "Scrap",
            Self::Regrind => "Regrind",
        }
    }
}

/// What goes on a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelContent {
    /// Code printed large at the top.
    pub code: String,
    /// Free text, possibly spanning several lines.
    pub description: String,
    /// Optional stamp under the code.
    pub stamp: Option<Stamp>,
}

impl LabelContent {
    /// Content without a stamp.
    #[must_use]
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            stamp: None,
        }
    }

    /// Attach (or clear) the stamp.
    #[must_use]
    pub fn with_stamp(mut self, stamp: Option<Stamp>) -> Self {
        self.stamp = stamp;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inch_constructor_truncates_to_whole_points() {
        let geometry = LabelGeometry::from_inches(4.0, 6.0, 0.25, 0.08).expect("valid geometry");
        assert_eq!(geometry, LabelGeometry::default());
        assert!((geometry.code_width() - 278.0).abs() < f32::EPSILON);
        assert!((geometry.description_width() - 252.0).abs() < f32::EPSILON);
    }

    #[test]
    fn description_band_uses_top_fraction() {
        let geometry = LabelGeometry::default();
        let typography = Typography::default();
        assert!((geometry.description_top(&typography) - 259.2).abs() < 1e-3);
        assert!((geometry.description_band(&typography) - 241.2).abs() < 1e-3);
    }

    #[test]
    fn geometry_rejects_bad_dimensions() {
        assert!(matches!(
            LabelGeometry::new(0.0, 10.0, 0.0, 0.0),
            Err(LayoutError::InvalidGeometry { field: "width", .. })
        ));
        assert!(matches!(
            LabelGeometry::new(100.0, 100.0, 50.0, 0.0),
            Err(LayoutError::InvalidGeometry { field: "margin", .. })
        ));
        assert!(matches!(
            LabelGeometry::new(100.0, 100.0, 10.0, 60.0),
            Err(LayoutError::InvalidGeometry {
                field: "code_side_margin",
                ..
            })
        ));
        assert!(LabelGeometry::new(f32::NAN, 10.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn typography_validation_names_the_field() {
        assert!(Typography::default().validate().is_ok());

        let mut typography = Typography::default();
        typography.description_sizes = SizeRange { max: 20, min: 30 };
        assert!(matches!(
            typography.validate(),
            Err(LayoutError::InvalidTypography {
                field: "description_sizes",
                ..
            })
        ));

        let mut typography = Typography::default();
        typography.line_spacing = 0.0;
        assert!(matches!(
            typography.validate(),
            Err(LayoutError::InvalidTypography {
                field: "line_spacing",
                ..
            })
        ));
    }

    #[test]
    fn regrind_takes_precedence() {
        assert_eq!(Stamp::from_flags(false, false), None);
        assert_eq!(Stamp::from_flags(true, false), Some(Stamp::Scrap));
        assert_eq!(Stamp::from_flags(false, true), Some(Stamp::Regrind));
        assert_eq!(Stamp::from_flags(true, true), Some(Stamp::Regrind));
        assert_eq!(Stamp::Regrind.text(), "Regrind");
    }
}
