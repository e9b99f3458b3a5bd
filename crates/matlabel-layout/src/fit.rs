//! Font-size search for single lines and wrapped paragraphs.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};
use crate::metrics::{FontFace, TextMeasurer};
use crate::wrap::wrap_text;

/// Inclusive range of whole-point font sizes searched from `max` down to `min`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRange {
    /// Largest size tried first.
    pub max: u16,
    /// Floor used when nothing larger fits.
    pub min: u16,
}

impl SizeRange {
    /// Build a validated range.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidTypography`] when `min` is zero or larger
    /// than `max`.
    pub fn new(field: &'static str, max: u16, min: u16) -> LayoutResult<Self> {
        if min == 0 {
            return Err(LayoutError::InvalidTypography {
                field,
                reason: "minimum size must be positive",
            });
        }
        if min > max {
            return Err(LayoutError::InvalidTypography {
                field,
                reason: "minimum size exceeds maximum size",
            });
        }
        Ok(Self { max, min })
    }

    /// Sizes in search order, largest first.
    pub fn descending(self) -> impl Iterator<Item = u16> {
        (self.min..=self.max).rev()
    }
}

/// Largest size in `range` at which `text` fits `target_width` on one line.
///
/// Falls back to `range.min` when even the floor is too wide.
#[must_use]
pub fn fit_single_line(
    measurer: &dyn TextMeasurer,
    text: &str,
    face: FontFace,
    target_width: f32,
    range: SizeRange,
) -> u16 {
    range
        .descending()
        .find(|&size| measurer.text_width(text, face, f32::from(size)) <= target_width)
        .unwrap_or(range.min)
}

/// Outcome of fitting a wrapped paragraph into a vertical band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParagraphFit {
    /// Chosen font size in points.
    pub size: u16,
    /// Distance between consecutive baselines.
    pub line_height: f32,
    /// Wrapped lines in reading order.
    pub lines: Vec<String>,
    /// Whether the block is taller than the band it was fitted into. Only
    /// possible at the floor size.
    pub overflow: bool,
}

impl ParagraphFit {
    /// Total block height: line count × line height.
    #[must_use]
    pub fn total_height(&self) -> f32 {
        block_height(self.lines.len(), self.line_height)
    }
}

/// Choose the largest size in `range` whose wrapped block fits `max_height`.
///
/// The text is wrapped at `max_width` for every candidate size. When no size
/// fits, the floor size is used and the result is flagged as overflowing.
#[must_use]
pub fn fit_paragraph(
    measurer: &dyn TextMeasurer,
    text: &str,
    face: FontFace,
    max_width: f32,
    max_height: f32,
    range: SizeRange,
    line_spacing: f32,
) -> ParagraphFit {
    for size in range.descending() {
        let lines = wrap_text(measurer, text, face, f32::from(size), max_width);
        let line_height = f32::from(size) * line_spacing;
        if block_height(lines.len(), line_height) <= max_height {
            return ParagraphFit {
                size,
                line_height,
                lines,
                overflow: false,
            };
        }
    }

    let size = range.min;
    let lines = wrap_text(measurer, text, face, f32::from(size), max_width);
    let line_height = f32::from(size) * line_spacing;
    let overflow = block_height(lines.len(), line_height) > max_height;
    ParagraphFit {
        size,
        line_height,
        lines,
        overflow,
    }
}

#[allow(clippy::cast_precision_loss)]
fn block_height(line_count: usize, line_height: f32) -> f32 {
    line_count as f32 * line_height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::StandardMetrics;

    struct FixedAdvance;

    impl TextMeasurer for FixedAdvance {
        #[allow(clippy::cast_precision_loss)]
        fn text_width(&self, text: &str, _face: FontFace, size: f32) -> f32 {
            text.chars().count() as f32 * size
        }
    }

    #[test]
    fn size_range_validation() {
        assert!(SizeRange::new("code", 220, 28).is_ok());
        assert!(SizeRange::new("code", 10, 10).is_ok());
        assert!(SizeRange::new("code", 10, 11).is_err());
        assert!(SizeRange::new("code", 10, 0).is_err());
        let sizes: Vec<u16> = SizeRange::new("x", 4, 2)
            .expect("valid range")
            .descending()
            .collect();
        assert_eq!(sizes, vec![4, 3, 2]);
    }

    #[test]
    fn single_line_shrinks_until_it_fits() {
        let range = SizeRange { max: 50, min: 5 };
        // 4 characters, width 4 * size <= 100 → size 25.
        assert_eq!(
            fit_single_line(&FixedAdvance, "ABCD", FontFace::TimesBold, 100.0, range),
            25
        );
        // Starting size already fits.
        assert_eq!(
            fit_single_line(&FixedAdvance, "A", FontFace::TimesBold, 100.0, range),
            50
        );
    }

    #[test]
    fn single_line_uses_floor_when_nothing_fits() {
        let range = SizeRange { max: 50, min: 5 };
        assert_eq!(
            fit_single_line(
                &FixedAdvance,
                "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
                FontFace::TimesBold,
                100.0,
                range
            ),
            5
        );
    }

    #[test]
    fn default_code_range_on_standard_metrics() {
        let range = SizeRange { max: 220, min: 28 };
        let target = 288.0 - 10.0;
        let size = fit_single_line(&StandardMetrics, "VG0100", FontFace::TimesBold, target, range);
        // Width per point is 3.5; floor(278 / 3.5) = 79.
        assert_eq!(size, 79);
    }

    #[test]
    fn paragraph_picks_largest_fitting_size() {
        let range = SizeRange { max: 10, min: 2 };
        let fit = fit_paragraph(
            &FixedAdvance,
            "aaaa bbbb cc",
            FontFace::TimesRoman,
            24.0,
            20.0,
            range,
            1.0,
        );
        assert!(!fit.overflow);
        assert!(fit.total_height() <= 20.0);
        // Three lines at every size; 3 * 6 = 18 is the first height <= 20.
        assert_eq!(fit.size, 6);
        assert_eq!(fit.lines, vec!["aaaa", "bbbb", "cc"]);
        assert!((fit.line_height - 6.0).abs() < f32::EPSILON);
    }

    #[test]
    fn paragraph_overflows_at_floor() {
        let range = SizeRange { max: 10, min: 8 };
        let fit = fit_paragraph(
            &FixedAdvance,
            "one\ntwo\nthree\nfour",
            FontFace::TimesRoman,
            1000.0,
            20.0,
            range,
            1.22,
        );
        assert_eq!(fit.size, 8);
        assert_eq!(fit.lines.len(), 4);
        assert!(fit.overflow);
        assert!(fit.total_height() > 20.0);
    }

    #[test]
    fn empty_description_is_one_blank_line() {
        let range = SizeRange { max: 52, min: 28 };
        let fit = fit_paragraph(
            &StandardMetrics,
            "",
            FontFace::TimesRoman,
            252.0,
            241.2,
            range,
            1.22,
        );
        assert_eq!(fit.size, 52);
        assert_eq!(fit.lines, vec![String::new()]);
        assert!(!fit.overflow);
    }
}
