//! Build manual module.
//!
//! Turns free-text manuals into numbered [`BuildStep`]s and back, generates
//! generic steps for kits without a usable manual, and keeps authored step
//! lists contiguously numbered.

mod authoring;
mod fallback;
mod parser;
mod render;
mod step;

pub use authoring::StepList;
pub use fallback::{fallback_steps, steps_or_fallback};
pub use parser::{parse_steps, MAX_PARSED_STEPS};
pub use render::render_manual;
pub use step::BuildStep;
