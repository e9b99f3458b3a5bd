//! Handlers for `layout` and `render`.

use matlabel_data::LabelRecord;
use matlabel_layout::{LabelContent, Stamp, fit_to_host};
use matlabel_render::{LabelRenderer, PageSetup};

use crate::cli::{LayoutArgs, RenderArgs};
use crate::context::{AppContext, CliResult, require_label};
use crate::output;

pub(crate) async fn handle_layout(ctx: &AppContext, args: LayoutArgs) -> CliResult<()> {
    let store = ctx.store().await?;
    let label = require_label(&store, &args.code).await?;
    let layout = ctx.layout()?;
    let host = ctx.host_setup(args.host.paper.as_deref(), args.host.scale)?;

    let plan = layout.plan(&content_for(&label, args.stamp.stamp()));
    let page_fit = fit_to_host(plan.width, plan.height, &host);
    println!("{}", output::layout_report(&plan, &page_fit, ctx.output)?);
    Ok(())
}

pub(crate) async fn handle_render(ctx: &AppContext, args: RenderArgs) -> CliResult<()> {
    let store = ctx.store().await?;
    let label = require_label(&store, &args.code).await?;
    let setup = if args.label_only {
        PageSetup::LabelOnly
    } else {
        PageSetup::Host(ctx.host_setup(args.host.paper.as_deref(), args.host.scale)?)
    };

    let renderer = LabelRenderer::new(ctx.layout()?);
    let content = content_for(&label, args.stamp.stamp());
    let rendered = renderer.render_to_path(&content, &setup, &args.out)?;
    println!(
        "{}",
        output::render_summary(&rendered, &args.out, ctx.output)?
    );
    Ok(())
}

fn content_for(label: &LabelRecord, stamp: Option<Stamp>) -> LabelContent {
    LabelContent::new(label.name.clone(), label.description.clone()).with_stamp(stamp)
}
