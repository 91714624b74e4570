// vitrine/src/pipeline/hooks.rs

//! Registration of `before`, `on` and `after` handlers.

use crate::pipeline::context_data::ContextData;
use crate::pipeline::control::PipelineControl;
use crate::pipeline::definition::Pipeline;
use crate::pipeline::error::PipelineError;
use crate::pipeline::step::StepLabel;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

/// A boxed asynchronous step handler.
///
/// It receives a clone of the run's `ContextData`, must release any lock guard
/// before awaiting, and resolves to `Continue` or `Stop`.
pub type Handler<TData, Err> = Box<
  dyn Fn(ContextData<TData>) -> Pin<Box<dyn Future<Output = Result<PipelineControl, Err>> + Send>>
    + Send
    + Sync,
>;

impl<S, TData, Err> Pipeline<S, TData, Err>
where
  S: StepLabel,
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  /// Registers a handler that runs before the step's `on` handlers.
  pub fn before<F, HandlerErr>(&mut self, label: S, handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static)
  where
    F: Future<Output = Result<PipelineControl, HandlerErr>> + Send + 'static,
    HandlerErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(label);
    push_handler(&mut self.before, label, handler_fn);
  }

  /// Registers the main work of a step.
  pub fn on<F, HandlerErr>(&mut self, label: S, handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static)
  where
    F: Future<Output = Result<PipelineControl, HandlerErr>> + Send + 'static,
    HandlerErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(label);
    push_handler(&mut self.on, label, handler_fn);
  }

  /// Registers a handler that runs once the step's `on` handlers succeeded.
  pub fn after<F, HandlerErr>(&mut self, label: S, handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static)
  where
    F: Future<Output = Result<PipelineControl, HandlerErr>> + Send + 'static,
    HandlerErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(label);
    push_handler(&mut self.after, label, handler_fn);
  }
}

fn push_handler<S, TData, Err, F, HandlerErr>(
  phase: &mut HashMap<S, Vec<Handler<TData, Err>>>,
  label: S,
  handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static,
) where
  S: StepLabel,
  TData: 'static + Send + Sync,
  Err: 'static,
  F: Future<Output = Result<PipelineControl, HandlerErr>> + Send + 'static,
  HandlerErr: Into<Err> + Send + Sync + 'static,
{
  let boxed: Handler<TData, Err> = Box::new(move |ctx_data| {
    let user_fut = handler_fn(ctx_data);
    Box::pin(async move { user_fut.await.map_err(Into::into) })
  });
  phase.entry(label).or_default().push(boxed);
}
