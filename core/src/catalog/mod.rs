// vitrine/src/catalog/mod.rs

//! The add-product orchestration and the owner-facing mutation entry points.

pub mod context;
pub mod controller;
pub mod steps;

pub use context::{AddProductCtxData, AddStage, AddStatus, ProductSubmission, StatusHandle};
pub use controller::CatalogController;
