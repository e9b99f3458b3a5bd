//! Host-page fitting: scale and centre the label content on Letter/A4 stock.
//!
//! # Design
//! - Both orientations are always computed so callers can report what was
//!   rejected as well as what was chosen.
//! - The chosen orientation is the one with the larger scaled footprint; ties
//!   keep the content upright.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::LayoutError;
use crate::model::POINTS_PER_INCH;

const MM_PER_INCH: f32 = 25.4;

/// Physical paper the label content is printed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HostPaper {
    /// US Letter, 8.5in × 11in.
    #[default]
    Letter,
    /// ISO A4, 210mm × 297mm.
    A4,
}

impl HostPaper {
    /// Page size in points as `(width, height)`.
    #[must_use]
    pub fn size(self) -> (f32, f32) {
        match self {
            Self::Letter => (8.5 * POINTS_PER_INCH, 11.0 * POINTS_PER_INCH),
            Self::A4 => (
                210.0 / MM_PER_INCH * POINTS_PER_INCH,
                297.0 / MM_PER_INCH * POINTS_PER_INCH,
            ),
        }
    }

    /// Canonical paper name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Letter => "Letter",
            Self::A4 => "A4",
        }
    }

    /// Resolve a paper name, falling back to Letter for unknown names.
    #[must_use]
    pub fn from_name_or_letter(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            warn!(paper = %name, "unknown host paper; printing on Letter");
            Self::Letter
        })
    }
}

impl FromStr for HostPaper {
    type Err = LayoutError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "letter" => Ok(Self::Letter),
            "a4" => Ok(Self::A4),
            _ => Err(LayoutError::UnknownPaper {
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for HostPaper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How content is scaled onto the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    /// Largest uniform scale that fits the printable area.
    #[default]
    Fit,
    /// Print at physical size.
    NoScale,
}

impl ScaleMode {
    /// Canonical mode name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fit => "fit",
            Self::NoScale => "noscale",
        }
    }
}

impl FromStr for ScaleMode {
    type Err = LayoutError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fit" => Ok(Self::Fit),
            "noscale" | "none" => Ok(Self::NoScale),
            _ => Err(LayoutError::UnknownScaleMode {
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for ScaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host page settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HostSetup {
    /// Paper stock.
    pub paper: HostPaper,
    /// Margin kept clear on every side, in points.
    pub margin: f32,
    /// Scaling rule.
    pub scale: ScaleMode,
}

impl Default for HostSetup {
    fn default() -> Self {
        Self {
            paper: HostPaper::Letter,
            margin: 0.25 * POINTS_PER_INCH,
            scale: ScaleMode::Fit,
        }
    }
}

/// Orientation of content on the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Content drawn as-is.
    Upright,
    /// Content turned 90° counter-clockwise.
    Rotated,
}

/// Affine transform `[a b c d e f]` in PDF `cm` order.
///
/// Maps `(x, y)` to `(a·x + c·y + e, b·x + d·y + f)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    /// Row 1, column 1.
    pub a: f32,
    /// Row 1, column 2.
    pub b: f32,
    /// Row 2, column 1.
    pub c: f32,
    /// Row 2, column 2.
    pub d: f32,
    /// Horizontal translation.
    pub e: f32,
    /// Vertical translation.
    pub f: f32,
}

impl Transform {
    /// Apply the transform to a point.
    #[must_use]
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a.mul_add(x, self.c.mul_add(y, self.e)),
            self.b.mul_add(x, self.d.mul_add(y, self.f)),
        )
    }
}

/// Scaled, centred footprint of the content for one orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    /// Orientation this placement describes.
    pub orientation: Orientation,
    /// Uniform scale factor.
    pub scale: f32,
    /// Left edge of the footprint on the host page.
    pub offset_x: f32,
    /// Bottom edge of the footprint on the host page.
    pub offset_y: f32,
    /// Horizontal extent of the footprint.
    pub width: f32,
    /// Vertical extent of the footprint.
    pub height: f32,
}

impl Placement {
    /// Area covered on the host page.
    #[must_use]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Transform from content coordinates to host coordinates.
    #[must_use]
    pub fn transform(&self) -> Transform {
        let s = self.scale;
        match self.orientation {
            Orientation::Upright => Transform {
                a: s,
                b: 0.0,
                c: 0.0,
                d: s,
                e: self.offset_x,
                f: self.offset_y,
            },
            // Content x runs up the page; content y runs right to left.
            Orientation::Rotated => Transform {
                a: 0.0,
                b: s,
                c: -s,
                d: 0.0,
                e: self.offset_x + self.width,
                f: self.offset_y,
            },
        }
    }
}

/// Both candidate placements on a host page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageFit {
    /// Paper stock.
    pub paper: HostPaper,
    /// Host page width.
    pub page_width: f32,
    /// Host page height.
    pub page_height: f32,
    /// Content drawn upright.
    pub upright: Placement,
    /// Content turned 90°.
    pub rotated: Placement,
}

impl PageFit {
    /// The placement with the larger footprint; upright on ties.
    #[must_use]
    pub fn chosen(&self) -> &Placement {
        if self.rotated.area() > self.upright.area() {
            &self.rotated
        } else {
            &self.upright
        }
    }
}

/// Compute upright and rotated placements of a content rectangle.
#[must_use]
pub fn fit_to_host(content_width: f32, content_height: f32, setup: &HostSetup) -> PageFit {
    let (page_width, page_height) = setup.paper.size();
    let avail_width = 2.0f32.mul_add(-setup.margin, page_width).max(1.0);
    let avail_height = 2.0f32.mul_add(-setup.margin, page_height).max(1.0);

    let place = |orientation: Orientation, extent_x: f32, extent_y: f32| {
        let scale = match setup.scale {
            ScaleMode::Fit => (avail_width / extent_x).min(avail_height / extent_y),
            ScaleMode::NoScale => 1.0,
        };
        let width = extent_x * scale;
        let height = extent_y * scale;
        Placement {
            orientation,
            scale,
            offset_x: (page_width - width) / 2.0,
            offset_y: (page_height - height) / 2.0,
            width,
            height,
        }
    };

    let fit = PageFit {
        paper: setup.paper,
        page_width,
        page_height,
        upright: place(Orientation::Upright, content_width, content_height),
        rotated: place(Orientation::Rotated, content_height, content_width),
    };
    debug!(
        paper = %setup.paper,
        scale_mode = %setup.scale,
        orientation = ?fit.chosen().orientation,
        scale = fit.chosen().scale,
        "host page fit computed"
    );
    fit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn paper_names_parse_case_insensitively() {
        assert_eq!("letter".parse::<HostPaper>().ok(), Some(HostPaper::Letter));
        assert_eq!(" A4 ".parse::<HostPaper>().ok(), Some(HostPaper::A4));
        assert!("tabloid".parse::<HostPaper>().is_err());
        assert_eq!(HostPaper::from_name_or_letter("tabloid"), HostPaper::Letter);
        assert_eq!(HostPaper::A4.to_string(), "A4");
    }

    #[test]
    fn paper_sizes_in_points() {
        let (w, h) = HostPaper::Letter.size();
        assert!(close(w, 612.0) && close(h, 792.0));
        let (w, h) = HostPaper::A4.size();
        assert!(close(w, 595.2756) && close(h, 841.8898));
    }

    #[test]
    fn scale_mode_names() {
        assert_eq!("fit".parse::<ScaleMode>().ok(), Some(ScaleMode::Fit));
        assert_eq!("noscale".parse::<ScaleMode>().ok(), Some(ScaleMode::NoScale));
        assert!("shrink".parse::<ScaleMode>().is_err());
    }

    #[test]
    fn four_by_six_on_letter_stays_upright() {
        let fit = fit_to_host(288.0, 432.0, &HostSetup::default());
        let chosen = fit.chosen();
        assert_eq!(chosen.orientation, Orientation::Upright);
        assert!(close(chosen.scale, 1.75));
        assert!(close(chosen.offset_x, 54.0));
        assert!(close(chosen.offset_y, 18.0));
        assert!(close(fit.rotated.scale, 576.0 / 432.0));
        assert!(fit.rotated.area() < fit.upright.area());
    }

    #[test]
    fn landscape_content_is_rotated() {
        let fit = fit_to_host(432.0, 288.0, &HostSetup::default());
        let chosen = fit.chosen();
        assert_eq!(chosen.orientation, Orientation::Rotated);
        assert!(close(chosen.scale, 1.75));
        assert!(close(chosen.width, 504.0));
        assert!(close(chosen.height, 756.0));
    }

    #[test]
    fn rotated_transform_maps_corners_into_footprint() {
        let fit = fit_to_host(432.0, 288.0, &HostSetup::default());
        let placement = fit.chosen();
        let transform = placement.transform();
        let corners = [(0.0, 0.0), (432.0, 0.0), (0.0, 288.0), (432.0, 288.0)];
        for (x, y) in corners {
            let (px, py) = transform.apply(x, y);
            assert!(px >= placement.offset_x - 1e-3);
            assert!(px <= placement.offset_x + placement.width + 1e-3);
            assert!(py >= placement.offset_y - 1e-3);
            assert!(py <= placement.offset_y + placement.height + 1e-3);
        }
        // The content's top edge ends up on the left of the footprint.
        let (px, _) = transform.apply(0.0, 288.0);
        assert!(close(px, placement.offset_x));
    }

    #[test]
    fn noscale_centres_at_physical_size_and_keeps_upright() {
        let setup = HostSetup {
            scale: ScaleMode::NoScale,
            ..HostSetup::default()
        };
        let fit = fit_to_host(288.0, 432.0, &setup);
        let chosen = fit.chosen();
        assert_eq!(chosen.orientation, Orientation::Upright);
        assert!(close(chosen.scale, 1.0));
        assert!(close(chosen.offset_x, 162.0));
        assert!(close(chosen.offset_y, 180.0));
    }

    #[test]
    fn oversized_margin_clamps_available_area() {
        let setup = HostSetup {
            margin: 1000.0,
            ..HostSetup::default()
        };
        let fit = fit_to_host(288.0, 432.0, &setup);
        assert!(fit.upright.scale > 0.0);
        assert!(fit.upright.width <= 1.0 + 1e-3);
    }
}
