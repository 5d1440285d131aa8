//! Manual serialization.

use crate::manual::BuildStep;

/// Serialize steps back into manual text.
///
/// Each step becomes `step {n}. {title}` followed by a blank line and its
/// description; steps are separated by a blank line. Parsing the result
/// yields the same steps as long as descriptions contain no blank lines
/// or header-like lines.
pub fn render_manual(steps: &[BuildStep]) -> String {
    steps
        .iter()
        .map(|s| format!("step {}. {}\n\n{}", s.step_number, s.title, s.description))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manual::parse_steps;

    #[test]
    fn test_render_format() {
        let text = render_manual(&[
            BuildStep::new(1, "Base", "Screw the base plate."),
            BuildStep::new(2, "Motor", "Mount the motor."),
        ]);
        assert_eq!(
            text,
            "step 1. Base\n\nScrew the base plate.\n\nstep 2. Motor\n\nMount the motor."
        );
    }

    #[test]
    fn test_render_then_parse() {
        let steps = vec![
            BuildStep::new(1, "Unbox", "Check the parts list."),
            BuildStep::new(2, "Wire the sensor", "VCC to 5V\nGND to GND\nOUT to D2"),
            BuildStep::new(3, "Upload", ""),
            BuildStep::new(4, "Calibrate", "Turn the potentiometer slowly."),
        ];
        assert_eq!(parse_steps(&render_manual(&steps)), steps);
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_manual(&[]), "");
    }
}
