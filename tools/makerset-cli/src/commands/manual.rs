//! Build manual commands.

use anyhow::Result;
use makerset_commerce::manual::{render_manual, steps_or_fallback, BuildStep, StepList};

use super::{ManualArgs, ManualCommand};
use crate::context::Context;
use crate::output::split_list;

/// Run the manual command.
pub async fn run(args: ManualArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ManualCommand::Parse { file, tools, parts } => {
            parse(&file, tools.as_deref(), parts.as_deref(), ctx)
        }
        ManualCommand::Render { file, renumber } => render(&file, renumber, ctx),
    }
}

fn parse(file: &str, tools: Option<&str>, parts: Option<&str>, ctx: &Context) -> Result<()> {
    let text = ctx.read_text(file)?;
    let tools = split_list(tools);
    let parts = split_list(parts);
    let steps = steps_or_fallback(&text, &tools, &parts);

    if ctx.output.is_json() {
        ctx.output.json(&steps);
        return Ok(());
    }

    ctx.output.header(&format!("{} steps", steps.len()));
    for step in &steps {
        print_step(step, ctx);
    }
    Ok(())
}

fn render(file: &str, renumber: bool, ctx: &Context) -> Result<()> {
    let steps: Vec<BuildStep> = ctx.read_json(file)?;
    let text = if renumber {
        let mut list = StepList::from_steps(steps);
        list.renumber();
        list.to_manual()
    } else {
        render_manual(&steps)
    };

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "manual": text }));
    } else {
        println!("{text}");
    }
    Ok(())
}

fn print_step(step: &BuildStep, ctx: &Context) {
    ctx.output.text("");
    ctx.output
        .text(&format!("{}. {}", step.step_number, console::style(&step.title).bold()));
    for line in step.description_lines() {
        ctx.output.text(&format!("   {line}"));
    }
}
