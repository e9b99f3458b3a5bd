//! Output renderers and formatting helpers for CLI commands.
//!
//! Each renderer returns the text to print so the formatting can be tested
//! without capturing stdout.

use std::fmt::Write as _;
use std::path::Path;

use matlabel_data::{ImportReport, LabelRecord};
use matlabel_layout::{LabelPlan, Orientation, PageFit};
use matlabel_render::RenderedLabel;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::context::{CliResult, json_text};

pub(crate) fn label_list(labels: &[LabelRecord], format: OutputFormat) -> CliResult<String> {
    if format == OutputFormat::Json {
        return json_text(&labels);
    }
    let mut out = format!("{:>6} {:<16} DESCRIPTION\n", "ID", "CODE");
    for label in labels {
        let _ = writeln!(
            out,
            "{:>6} {:<16} {}",
            label.id,
            label.name,
            first_line(&label.description)
        );
    }
    let _ = write!(out, "{} label(s)", labels.len());
    Ok(out)
}

pub(crate) fn label_detail(label: &LabelRecord, format: OutputFormat) -> CliResult<String> {
    if format == OutputFormat::Json {
        return json_text(label);
    }
    let mut out = format!("id: {}\ncode: {}\n", label.id, label.name);
    let _ = writeln!(out, "created: {}", label.created_at.to_rfc3339());
    out.push_str("description:");
    for line in label.description.lines() {
        let _ = write!(out, "\n  {line}");
    }
    Ok(out)
}

pub(crate) fn label_saved(
    verb: &str,
    label: &LabelRecord,
    format: OutputFormat,
) -> CliResult<String> {
    match format {
        OutputFormat::Json => json_text(label),
        OutputFormat::Table => Ok(format!("{verb} label {} (id {}).", label.name, label.id)),
    }
}

pub(crate) fn deleted(count: u64, format: OutputFormat) -> CliResult<String> {
    #[derive(Serialize)]
    struct Deleted {
        deleted: u64,
    }
    match format {
        OutputFormat::Json => json_text(&Deleted { deleted: count }),
        OutputFormat::Table => Ok(format!("Deleted {count} label(s).")),
    }
}

pub(crate) fn import_report(report: &ImportReport, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => json_text(report),
        OutputFormat::Table => Ok(format!(
            "Added: {}, Skipped: {}, Rejected: {}",
            report.added, report.skipped, report.rejected
        )),
    }
}

#[derive(Serialize)]
struct LayoutReport<'a> {
    plan: &'a LabelPlan,
    page_fit: &'a PageFit,
}

pub(crate) fn layout_report(
    plan: &LabelPlan,
    page_fit: &PageFit,
    format: OutputFormat,
) -> CliResult<String> {
    if format == OutputFormat::Json {
        return json_text(&LayoutReport { plan, page_fit });
    }

    let code = &plan.code.run;
    let mut out = format!(
        "label: {}x{} pt\ncode: {} at {} pt (width {:.1} pt)\n",
        plan.width, plan.height, code.text, code.size, code.width
    );
    if let Some(stamp) = &plan.stamp {
        let _ = writeln!(out, "stamp: {} at {} pt", stamp.run.text, stamp.run.size);
    }
    let fit = &plan.description.fit;
    let _ = writeln!(
        out,
        "description: {} pt, {} line(s), line height {:.1} pt, band {:.1} pt",
        fit.size,
        fit.lines.len(),
        fit.line_height,
        plan.description.band
    );
    for line in &fit.lines {
        let _ = writeln!(out, "  | {line}");
    }
    let _ = writeln!(out, "overflow: {}", if fit.overflow { "yes" } else { "no" });
    let placement = page_fit.chosen();
    let _ = write!(
        out,
        "host: {} {}x{} pt, {}, scale {:.3}, offset ({:.1}, {:.1})",
        page_fit.paper,
        page_fit.page_width,
        page_fit.page_height,
        orientation_label(placement.orientation),
        placement.scale,
        placement.offset_x,
        placement.offset_y
    );
    Ok(out)
}

#[derive(Serialize)]
struct RenderSummary<'a> {
    path: &'a Path,
    bytes: usize,
    page_width: f32,
    page_height: f32,
    orientation: Option<&'static str>,
    overflow: bool,
}

pub(crate) fn render_summary(
    rendered: &RenderedLabel,
    path: &Path,
    format: OutputFormat,
) -> CliResult<String> {
    let summary = RenderSummary {
        path,
        bytes: rendered.bytes.len(),
        page_width: rendered.page_width,
        page_height: rendered.page_height,
        orientation: rendered
            .placement()
            .map(|placement| orientation_label(placement.orientation)),
        overflow: rendered.plan.description.fit.overflow,
    };
    if format == OutputFormat::Json {
        return json_text(&summary);
    }
    let mut out = format!(
        "Wrote {} ({} bytes, {}x{} pt",
        path.display(),
        summary.bytes,
        summary.page_width,
        summary.page_height
    );
    if let Some(orientation) = summary.orientation {
        let _ = write!(out, ", {orientation}");
    }
    out.push(')');
    if summary.overflow {
        out.push_str("\nwarning: description overflows the label at the minimum size");
    }
    Ok(out)
}

const fn orientation_label(orientation: Orientation) -> &'static str {
    match orientation {
        Orientation::Upright => "upright",
        Orientation::Rotated => "rotated",
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use matlabel_layout::{
        HostSetup, LabelContent, LabelGeometry, LabelLayout, Stamp, Typography, fit_to_host,
    };

    fn fixed_record(id: i64, name: &str, description: &str) -> LabelRecord {
        LabelRecord {
            id,
            name: name.to_string(),
            description: description.to_string(),
            created_at: DateTime::from_timestamp(0, 0).expect("epoch"),
        }
    }

    #[test]
    fn list_shows_first_description_line_and_count() -> CliResult<()> {
        let labels = vec![
            fixed_record(1, "VG0100", "Polypropylene homopolymer\nNatural"),
            fixed_record(2, "PC15", "Polycarbonate clear"),
        ];
        let text = label_list(&labels, OutputFormat::Table)?;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[1],
            format!("{:>6} {:<16} {}", 1, "VG0100", "Polypropylene homopolymer")
        );
        assert_eq!(lines[3], "2 label(s)");
        Ok(())
    }

    #[test]
    fn detail_indents_every_description_line() -> CliResult<()> {
        let label = fixed_record(7, "VG0100", "Polypropylene homopolymer\nNatural");
        let text = label_detail(&label, OutputFormat::Table)?;
        assert!(text.starts_with("id: 7\ncode: VG0100\ncreated: 1970-01-01T00:00:00+00:00\n"));
        assert!(text.ends_with("description:\n  Polypropylene homopolymer\n  Natural"));
        Ok(())
    }

    #[test]
    fn import_report_uses_fixed_wording() -> CliResult<()> {
        let report = ImportReport {
            added: 3,
            skipped: 1,
            rejected: 2,
        };
        assert_eq!(
            import_report(&report, OutputFormat::Table)?,
            "Added: 3, Skipped: 1, Rejected: 2"
        );
        let json: serde_json::Value =
            serde_json::from_str(&import_report(&report, OutputFormat::Json)?)
                .map_err(crate::context::CliError::failure)?;
        assert_eq!(json["added"], 3);
        Ok(())
    }

    #[test]
    fn layout_report_lists_lines_and_host_fit() -> CliResult<()> {
        let layout = LabelLayout::new(LabelGeometry::default(), Typography::default())
            .map_err(crate::context::CliError::failure)?;
        let content = LabelContent::new("VG0100", "Polypropylene homopolymer\nNatural")
            .with_stamp(Some(Stamp::Scrap));
        let plan = layout.plan(&content);
        let fit = fit_to_host(plan.width, plan.height, &HostSetup::default());
        let text = layout_report(&plan, &fit, OutputFormat::Table)?;
        assert!(text.contains("code: VG0100 at "));
        assert!(text.contains("stamp: Scrap at "));
        assert!(text.contains("  | Natural\n"));
        assert!(text.contains("overflow: no\n"));
        assert!(text.ends_with("offset (54.0, 18.0)"));
        assert!(text.contains("host: Letter 612x792 pt, upright, scale 1.750"));
        Ok(())
    }
}
