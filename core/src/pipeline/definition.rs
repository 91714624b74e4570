// vitrine/src/pipeline/definition.rs

//! The `Pipeline<S, TData, Err>` struct and its construction.

use crate::pipeline::context_data::ContextData;
use crate::pipeline::error::PipelineError;
use crate::pipeline::hooks::Handler;
use crate::pipeline::step::{StepDef, StepLabel};
use std::collections::HashMap;
use std::sync::Arc;

/// Called with the step label each time the engine enters a step.
pub type StepObserver<S, TData> = Arc<dyn Fn(S, &ContextData<TData>) + Send + Sync + 'static>;

/// An ordered list of labelled steps, each with `before`/`on`/`after` handlers.
///
/// `S` labels the steps, `TData` is the shared run state and `Err` is the error
/// type handlers return. Engine failures are converted into `Err` through
/// `From<PipelineError>`.
pub struct Pipeline<S, TData, Err>
where
  S: StepLabel,
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  pub(crate) steps: Vec<StepDef<S>>,

  pub(crate) before: HashMap<S, Vec<Handler<TData, Err>>>,
  pub(crate) on: HashMap<S, Vec<Handler<TData, Err>>>,
  pub(crate) after: HashMap<S, Vec<Handler<TData, Err>>>,

  pub(crate) observer: Option<StepObserver<S, TData>>,
}

impl<S, TData, Err> Pipeline<S, TData, Err>
where
  S: StepLabel,
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  /// Declares the steps in execution order as `(label, optional)` pairs.
  pub fn new(step_defs: &[(S, bool)]) -> Self {
    let steps = step_defs
      .iter()
      .map(|(label, optional)| StepDef {
        label: *label,
        optional: *optional,
      })
      .collect();

    Self {
      steps,
      before: HashMap::new(),
      on: HashMap::new(),
      after: HashMap::new(),
      observer: None,
    }
  }

  /// Installs a callback invoked as each step is entered.
  pub fn observe_steps(&mut self, observer: impl Fn(S, &ContextData<TData>) + Send + Sync + 'static) {
    self.observer = Some(Arc::new(observer));
  }

  pub fn steps(&self) -> impl Iterator<Item = S> + '_ {
    self.steps.iter().map(|s| s.label)
  }

  /// Panics when `label` was not declared. Registering against an undeclared
  /// step is a programming error, not a runtime condition.
  pub(crate) fn ensure_step_exists(&self, label: S) {
    if !self.steps.iter().any(|s| s.label == label) {
      panic!("Pipeline setup error: step '{}' is not declared.", label);
    }
  }

  pub(crate) fn has_handlers(&self, label: S) -> bool {
    [&self.before, &self.on, &self.after]
      .iter()
      .any(|phase| phase.get(&label).map_or(false, |v| !v.is_empty()))
  }
}
