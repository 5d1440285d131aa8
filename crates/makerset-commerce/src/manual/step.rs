//! Build step type.

use serde::{Deserialize, Serialize};

/// One numbered instruction in a kit's assembly manual.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildStep {
    pub step_number: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl BuildStep {
    pub fn new(step_number: u32, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            step_number,
            title: title.into(),
            description: description.into(),
        }
    }

    /// Description lines, skipping blanks.
    pub fn description_lines(&self) -> impl Iterator<Item = &str> {
        self.description.lines().filter(|l| !l.trim().is_empty())
    }
}
