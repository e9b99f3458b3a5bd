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

//! PDF output for label plans.
//!
//! Layout: `pdf.rs` (object/xref serializer and content operators),
//! `renderer.rs` (`LabelRenderer` drawing a plan label-sized or on host paper),
//! `error.rs` (`RenderError`).

pub mod error;
mod pdf;
pub mod renderer;

pub use error::{RenderError, RenderResult};
pub use renderer::{LabelRenderer, PageSetup, RenderedLabel};
