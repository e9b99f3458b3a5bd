//! Draw a [`LabelPlan`] onto a PDF page, either label-sized or centred on host
//! paper.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use matlabel_layout::{
    DrawOp, HostSetup, LabelContent, LabelLayout, LabelPlan, PageFit, Placement, fit_to_host,
};
use tracing::{info, warn};

use crate::error::{RenderError, RenderResult};
use crate::pdf::{ContentStream, DocumentInfo, write_document};

const PRODUCER: &str = "matlabel";

/// Page the label is drawn on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageSetup {
    /// Page exactly the size of the label content.
    LabelOnly,
    /// Content scaled and centred on host paper.
    Host(HostSetup),
}

/// Output of a render.
#[derive(Debug, Clone)]
pub struct RenderedLabel {
    /// The positioned label.
    pub plan: LabelPlan,
    /// Host fit, when rendered onto host paper.
    pub page_fit: Option<PageFit>,
    /// Page width in points.
    pub page_width: f32,
    /// Page height in points.
    pub page_height: f32,
    /// Serialized PDF document.
    pub bytes: Vec<u8>,
}

impl RenderedLabel {
    /// Placement used on the host page, if any.
    #[must_use]
    pub fn placement(&self) -> Option<&Placement> {
        self.page_fit.as_ref().map(PageFit::chosen)
    }
}

/// Renders label content to PDF.
#[derive(Debug, Clone)]
pub struct LabelRenderer {
    layout: LabelLayout,
    created: Option<DateTime<Utc>>,
}

impl LabelRenderer {
    /// Renderer over a configured layout engine.
    #[must_use]
    pub const fn new(layout: LabelLayout) -> Self {
        Self {
            layout,
            created: None,
        }
    }

    /// Pin the document creation timestamp instead of using the clock.
    #[must_use]
    pub fn with_creation_time(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    /// Layout engine in use.
    #[must_use]
    pub const fn layout(&self) -> &LabelLayout {
        &self.layout
    }

    /// Lay out and serialize a label.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidInput`] when the code is blank.
    pub fn render(&self, content: &LabelContent, setup: &PageSetup) -> RenderResult<RenderedLabel> {
        if content.code.trim().is_empty() {
            return Err(RenderError::InvalidInput {
                field: "code",
                reason: "code must not be empty",
                value: None,
            });
        }

        let plan = self.layout.plan(content);
        let mut stream = ContentStream::default();
        let (page_fit, page_width, page_height) = match setup {
            PageSetup::LabelOnly => {
                draw_plan(&mut stream, &plan);
                (None, plan.width, plan.height)
            }
            PageSetup::Host(host) => {
                let fit = fit_to_host(plan.width, plan.height, host);
                stream.save();
                stream.concat(&fit.chosen().transform());
                draw_plan(&mut stream, &plan);
                stream.restore();
                (Some(fit), fit.page_width, fit.page_height)
            }
        };

        if plan.description.fit.overflow {
            warn!(
                code = %content.code,
                size = plan.description.fit.size,
                "description overflows its band at the minimum size"
            );
        }

        let info = DocumentInfo {
            title: content.code.clone(),
            producer: PRODUCER,
            created: self.created.unwrap_or_else(Utc::now),
        };
        let bytes = write_document(page_width, page_height, stream, &info);
        Ok(RenderedLabel {
            plan,
            page_fit,
            page_width,
            page_height,
            bytes,
        })
    }

    /// Render a label and write the document to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidInput`] for blank codes and
    /// [`RenderError::Io`] when the file cannot be written.
    pub fn render_to_path(
        &self,
        content: &LabelContent,
        setup: &PageSetup,
        path: &Path,
    ) -> RenderResult<RenderedLabel> {
        let rendered = self.render(content, setup)?;
        fs::write(path, &rendered.bytes)
            .map_err(|source| RenderError::io("write_pdf", path, source))?;
        info!(
            code = %content.code,
            path = %path.display(),
            bytes = rendered.bytes.len(),
            "label written"
        );
        Ok(rendered)
    }
}

fn draw_plan(stream: &mut ContentStream, plan: &LabelPlan) {
    for op in plan.draw_ops() {
        match op {
            DrawOp::Text(run) if run.text.is_empty() => {}
            DrawOp::Text(run) => stream.text(run.face, run.size, run.left(), run.baseline, &run.text),
            DrawOp::Rule(rule) => stream.line(rule.stroke, rule.x1, rule.x2, rule.y),
        }
    }
}
