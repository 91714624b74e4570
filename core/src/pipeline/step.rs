// vitrine/src/pipeline/step.rs

//! Step labels and step definitions.

use std::fmt;
use std::hash::Hash;

/// Anything usable as a step identifier: typically a small fieldless enum.
pub trait StepLabel: Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static {}

impl<T> StepLabel for T where T: Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static {}

/// A declared step: its label and whether it may run without handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDef<S: StepLabel> {
  pub label: S,
  pub optional: bool,
}
