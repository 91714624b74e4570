// vitrine/src/pipeline/mod.rs

//! A small asynchronous step engine.
//!
//! Steps are declared up front with a typed label, handlers are attached per
//! phase (`before`, `on`, `after`), and `run` drives them in order against a
//! shared `ContextData`. The add-product flow in [`crate::catalog`] is built on it.

pub mod context_data;
pub mod control;
pub mod definition;
pub mod error;
pub mod execution;
pub mod hooks;
pub mod step;

pub use context_data::ContextData;
pub use control::{PipelineControl, PipelineResult};
pub use definition::{Pipeline, StepObserver};
pub use error::PipelineError;
pub use hooks::Handler;
pub use step::{StepDef, StepLabel};
