//! Templated kit copy: learning outcomes and builder encouragement.

use serde::{Deserialize, Serialize};

/// Kit difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Parse a difficulty label; unknown labels map to `Beginner`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "intermediate" | "medium" => Difficulty::Intermediate,
            "advanced" | "hard" | "expert" => Difficulty::Advanced,
            _ => Difficulty::Beginner,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

/// Learning outcomes for a kit of the given category and difficulty.
///
/// Returns three category-specific outcomes plus one or two that depend on
/// difficulty.
pub fn learning_outcomes(category: &str, difficulty: Difficulty) -> Vec<String> {
    let category = category.trim().to_lowercase();
    let topic: [&str; 3] = if category.contains("electr") {
        [
            "Read a circuit diagram and identify its components",
            "Build a working circuit on a breadboard",
            "Measure voltage and current with a multimeter",
        ]
    } else if category.contains("robot") {
        [
            "Assemble a robot chassis with motors and wheels",
            "Connect sensors so the robot reacts to its surroundings",
            "Explain how feedback loops steer a robot",
        ]
    } else if category.contains("program") || category.contains("coding") {
        [
            "Write and upload a program to a microcontroller",
            "Use loops and conditions to control hardware",
            "Debug a program by reading its serial output",
        ]
    } else if category.contains("mechan") {
        [
            "Explain how gears trade speed for force",
            "Build a mechanism from a technical drawing",
            "Use hand tools safely and precisely",
        ]
    } else {
        [
            "Follow step-by-step technical instructions",
            "Recognize the role of each part in the finished project",
            "Test a finished build and fix what does not work",
        ]
    };

    let mut outcomes: Vec<String> = topic.iter().map(|s| s.to_string()).collect();
    match difficulty {
        Difficulty::Beginner => {
            outcomes.push("Gain confidence completing a first hands-on build".to_string());
        }
        Difficulty::Intermediate => {
            outcomes.push("Adapt the design with a modification of your own".to_string());
        }
        Difficulty::Advanced => {
            outcomes.push("Plan and document an extension of the project".to_string());
            outcomes.push("Troubleshoot faults without step-by-step guidance".to_string());
        }
    }
    outcomes
}

/// Encouragement for a builder partway through a manual.
pub fn motivation_message(completed_steps: u32, total_steps: u32) -> String {
    if total_steps == 0 {
        return "Ready when you are. Open the manual to get started!".to_string();
    }
    let completed = completed_steps.min(total_steps);
    let remaining = total_steps - completed;
    let percent = u64::from(completed) * 100 / u64::from(total_steps);
    let steps = if remaining == 1 { "step" } else { "steps" };

    match percent {
        0 => format!("Let's build! {total_steps} steps stand between you and a finished project."),
        100 => "Done! Test your build and show it off.".to_string(),
        p if p < 50 => format!("Great start: {completed} of {total_steps} steps done. Keep going!"),
        p if p < 80 => format!("Over halfway there ({p}%). Only {remaining} {steps} left."),
        _ => format!("Almost finished! Just {remaining} {steps} to go."),
    }
}
