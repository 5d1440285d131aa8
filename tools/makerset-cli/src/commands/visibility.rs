//! Publish or unpublish a kit.

use anyhow::Result;
use makerset_commerce::catalog::VisibilityUpdate;
use makerset_commerce::SetId;

use super::VisibilityArgs;
use crate::context::Context;

/// Run the visibility command.
pub async fn run(args: VisibilityArgs, ctx: &Context) -> Result<()> {
    let update = VisibilityUpdate::new(SetId::new(args.set_id), args.visible && !args.hidden);

    let spinner = ctx.output.spinner("Updating visibility...");
    let result = ctx.api().set_visibility(&update).await;
    spinner.finish_and_clear();
    result?;

    if ctx.output.is_json() {
        ctx.output.json(&update);
        return Ok(());
    }
    let state = if update.visible { "visible" } else { "hidden" };
    ctx.output
        .success(&format!("Set {} is now {}", update.set_id, state));
    Ok(())
}
