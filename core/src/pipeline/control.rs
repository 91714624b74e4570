// vitrine/src/pipeline/control.rs

//! Signals for controlling pipeline flow and the outcome of a pipeline run.

/// Returned by every handler to tell the engine whether to keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineControl {
  /// Proceed with the remaining handlers of this step and the following steps.
  Continue,
  /// Halt the run right here. Nothing after the current handler executes.
  Stop,
}

/// Outcome of a run that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineResult {
  /// Every declared step ran.
  Completed,
  /// A handler returned `PipelineControl::Stop`.
  Stopped,
}
