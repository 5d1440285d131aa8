//! Generic steps for kits without a parseable manual.

use crate::manual::{parse_steps, BuildStep};

/// Produce a generic step sequence for a kit.
///
/// Tool setup and material organization only appear when the kit lists
/// tools or parts. Steps are numbered by their final position.
pub fn fallback_steps<T: AsRef<str>, P: AsRef<str>>(tools: &[T], parts: &[P]) -> Vec<BuildStep> {
    let mut drafts: Vec<(&str, String)> = vec![(
        "Preparation",
        "Read through all instructions first and clear a well-lit workspace.".to_string(),
    )];

    if !tools.is_empty() {
        drafts.push((
            "Tool setup",
            format!("Gather and check the required tools: {}.", join(tools)),
        ));
    }

    if !parts.is_empty() {
        drafts.push((
            "Organize materials",
            format!("Lay out and count every part before you start: {}.", join(parts)),
        ));
    }

    drafts.push((
        "Assembly",
        "Assemble the project following the diagrams, checking each connection as you go."
            .to_string(),
    ));
    drafts.push((
        "Testing",
        "Power up or run the finished project and check that everything works as expected."
            .to_string(),
    ));

    drafts
        .into_iter()
        .enumerate()
        .map(|(i, (title, description))| BuildStep::new(i as u32 + 1, title, description))
        .collect()
}

/// Parse a manual, falling back to generic steps when nothing parses.
pub fn steps_or_fallback<T: AsRef<str>, P: AsRef<str>>(
    manual: &str,
    tools: &[T],
    parts: &[P],
) -> Vec<BuildStep> {
    let steps = parse_steps(manual);
    if steps.is_empty() {
        fallback_steps(tools, parts)
    } else {
        steps
    }
}

fn join<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
