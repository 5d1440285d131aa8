//! Show ratings for a kit.

use anyhow::Result;
use makerset_commerce::SetId;

use super::RatingsArgs;
use crate::context::Context;

/// Run the ratings command.
pub async fn run(args: RatingsArgs, ctx: &Context) -> Result<()> {
    let set_id = SetId::new(args.set_id);

    let spinner = ctx.output.spinner("Fetching ratings...");
    let result = ctx.api().set_ratings(set_id).await;
    spinner.finish_and_clear();
    let summary = result?;

    if ctx.output.is_json() {
        ctx.output.json(&summary);
        return Ok(());
    }

    ctx.output.header(&format!("Ratings for set {set_id}"));
    ctx.output.kv("Average", &summary.average_label());
    ctx.output.kv("Reviews", &summary.review_count.to_string());

    for review in summary.reviews.iter().take(args.limit) {
        ctx.output.text("");
        let date = review
            .created_at
            .map(|d| format!(" on {}", d.format("%Y-%m-%d")))
            .unwrap_or_default();
        ctx.output
            .list_item(&format!("{} by {}{}", review.stars(), review.author(), date));
        if let Some(comment) = review.comment.as_deref().filter(|c| !c.trim().is_empty()) {
            ctx.output.text(&format!("    {}", comment.trim()));
        }
    }
    if summary.reviews.len() > args.limit {
        ctx.output.text("");
        ctx.output.info(&format!(
            "{} more reviews not shown (use --limit)",
            summary.reviews.len() - args.limit
        ));
    }
    Ok(())
}
