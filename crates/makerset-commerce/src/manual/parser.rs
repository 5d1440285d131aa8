//! Line-oriented manual parser.

use std::sync::OnceLock;

use regex::Regex;

use crate::manual::BuildStep;

/// Parsed manuals are cut to this many steps.
pub const MAX_PARSED_STEPS: usize = 15;

fn header_pattern() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| {
        Regex::new(r"^(?i:step\s+)?(\d+)\.?\s+(.+)$").expect("step header pattern is valid")
    })
}

/// Split free text into build steps.
///
/// A line of the form `[step ]<digits>[.] <title>` opens a step; every other
/// non-blank line extends the open step's description. Text before the
/// first header is dropped. Step numbers are taken as written and not
/// renumbered. At most [`MAX_PARSED_STEPS`] steps are returned.
///
/// Never fails: input without any header yields an empty list, and the
/// caller decides whether to fall back to generic steps.
///
/// ```
/// use makerset_commerce::manual::parse_steps;
///
/// let steps = parse_steps("Step 1. Solder the header\nHold the iron for 2s.");
/// assert_eq!(steps.len(), 1);
/// assert_eq!(steps[0].title, "Solder the header");
/// assert_eq!(steps[0].description, "Hold the iron for 2s.");
/// ```
pub fn parse_steps(text: &str) -> Vec<BuildStep> {
    let header = header_pattern();
    let mut steps = Vec::new();
    let mut current: Option<BuildStep> = None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let opened = header.captures(line).and_then(|caps| {
            let number = caps[1].parse::<u32>().ok()?;
            Some(BuildStep::new(number, caps[2].trim(), String::new()))
        });

        if let Some(step) = opened {
            if let Some(done) = current.replace(step) {
                steps.push(done);
            }
        } else if let Some(open) = current.as_mut() {
            if !open.description.is_empty() {
                open.description.push('\n');
            }
            open.description.push_str(line);
        }
    }

    steps.extend(current);
    steps.truncate(MAX_PARSED_STEPS);
    steps
}
