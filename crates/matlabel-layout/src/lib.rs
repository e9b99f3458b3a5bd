#![forbid(unsafe_code)]
#![deny(
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]

//! Label layout and typography engine.
//!
//! Layout: `metrics.rs` (font widths), `wrap.rs` (greedy wrapping), `fit.rs`
//! (font-size search), `model.rs` (geometry, typography, content), `plan.rs`
//! (`LabelLayout` and the positioned `LabelPlan`), `page.rs` (host-page fit).
//!
//! Everything here is pure: no I/O, no clocks, no global state. Renderers
//! consume a [`LabelPlan`] and a [`PageFit`] and only translate coordinates.

pub mod error;
pub mod fit;
pub mod metrics;
pub mod model;
pub mod page;
pub mod plan;
pub mod wrap;

pub use error::{LayoutError, LayoutResult};
pub use fit::{ParagraphFit, SizeRange, fit_paragraph, fit_single_line};
pub use metrics::{FontFace, StandardMetrics, TextMeasurer, win_ansi_byte};
pub use model::{Alignment, LabelContent, LabelGeometry, POINTS_PER_INCH, Stamp, Typography};
pub use page::{
    HostPaper, HostSetup, Orientation, PageFit, Placement, ScaleMode, Transform, fit_to_host,
};
pub use plan::{
    Anchor, DescriptionBlock, DrawOp, LabelLayout, LabelPlan, Rule, TextRun, UnderlinedRun,
};
pub use wrap::{wrap_paragraph, wrap_text};
