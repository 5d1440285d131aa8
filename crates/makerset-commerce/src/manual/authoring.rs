//! Editable step list for manual authoring.

use serde::{Deserialize, Serialize};

use crate::manual::{render_manual, BuildStep};
use crate::CommerceError;

/// An ordered list of build steps under edit.
///
/// Numbers loaded from a parsed manual are kept as they are until the first
/// edit; after any edit every step is numbered by its position, starting
/// at 1.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct StepList {
    steps: Vec<BuildStep>,
}

impl StepList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap existing steps without renumbering them.
    pub fn from_steps(steps: Vec<BuildStep>) -> Self {
        Self { steps }
    }

    /// Append a step.
    pub fn push(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<&BuildStep, CommerceError> {
        let step = Self::draft(title, description)?;
        self.steps.push(step);
        self.renumber();
        let last = self.steps.len() - 1;
        Ok(&self.steps[last])
    }

    /// Insert a step at `index` (0-based), shifting later steps down.
    pub fn insert(
        &mut self,
        index: usize,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<(), CommerceError> {
        if index > self.steps.len() {
            return Err(out_of_range(index, self.steps.len()));
        }
        let step = Self::draft(title, description)?;
        self.steps.insert(index, step);
        self.renumber();
        Ok(())
    }

    /// Remove the step at `index`.
    pub fn remove(&mut self, index: usize) -> Result<BuildStep, CommerceError> {
        if index >= self.steps.len() {
            return Err(out_of_range(index, self.steps.len()));
        }
        let removed = self.steps.remove(index);
        self.renumber();
        Ok(removed)
    }

    /// Move a step from one position to another.
    pub fn move_step(&mut self, from: usize, to: usize) -> Result<(), CommerceError> {
        let len = self.steps.len();
        if from >= len {
            return Err(out_of_range(from, len));
        }
        if to >= len {
            return Err(out_of_range(to, len));
        }
        let step = self.steps.remove(from);
        self.steps.insert(to, step);
        self.renumber();
        Ok(())
    }

    /// Replace the title and description of a step.
    pub fn update(
        &mut self,
        index: usize,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<(), CommerceError> {
        let len = self.steps.len();
        let draft = Self::draft(title, description)?;
        let step = self
            .steps
            .get_mut(index)
            .ok_or_else(|| out_of_range(index, len))?;
        step.title = draft.title;
        step.description = draft.description;
        self.renumber();
        Ok(())
    }

    /// Number every step by position.
    pub fn renumber(&mut self) {
        for (i, step) in self.steps.iter_mut().enumerate() {
            step.step_number = i as u32 + 1;
        }
    }

    /// The steps in order.
    pub fn steps(&self) -> &[BuildStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Serialize to manual text.
    pub fn to_manual(&self) -> String {
        render_manual(&self.steps)
    }

    pub fn into_steps(self) -> Vec<BuildStep> {
        self.steps
    }

    fn draft(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<BuildStep, CommerceError> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(CommerceError::InvalidInput(
                "step title must not be empty".to_string(),
            ));
        }
        Ok(BuildStep::new(0, title, description.into()))
    }
}

fn out_of_range(index: usize, len: usize) -> CommerceError {
    CommerceError::InvalidInput(format!("step index {index} out of range (0..{len})"))
}
