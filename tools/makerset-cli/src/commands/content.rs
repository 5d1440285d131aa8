//! Templated kit copy.

use anyhow::Result;
use makerset_commerce::content::{learning_outcomes, motivation_message, Difficulty};

use super::{ContentArgs, ContentCommand};
use crate::context::Context;

/// Run the content command.
pub async fn run(args: ContentArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ContentCommand::Outcomes {
            category,
            difficulty,
        } => {
            let difficulty = Difficulty::from_label(&difficulty);
            let outcomes = learning_outcomes(&category, difficulty);
            if ctx.output.is_json() {
                ctx.output.json(&outcomes);
                return Ok(());
            }
            ctx.output.header(&format!(
                "What you will learn ({}, {})",
                category,
                difficulty.as_str()
            ));
            for outcome in &outcomes {
                ctx.output.list_item(outcome);
            }
        }
        ContentCommand::Motivation { completed, total } => {
            let message = motivation_message(completed, total);
            if ctx.output.is_json() {
                ctx.output.json(&serde_json::json!({ "message": message }));
            } else {
                ctx.output.text(&message);
            }
        }
    }
    Ok(())
}
