// vitrine/src/lib.rs

//! Vitrine: the product catalog behind a showcase storefront.
//!
//! The crate covers the owner's side of the catalog:
//!  - Pre-upload validation of product images and their upload to a hosted
//!    media service (Cloudinary).
//!  - CRUD over a `products` document collection (Firestore REST, or an
//!    in-memory backend for local runs and tests).
//!  - The add-product flow, run as a small async pipeline of labelled steps
//!    with observable progress.
//!  - Owner password verification and short-lived owner sessions.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod media;
pub mod model;
pub mod pipeline;
pub mod store;

pub use crate::auth::{OwnerGate, OwnerSession, SessionBook};
pub use crate::catalog::{AddStage, AddStatus, CatalogController, ProductSubmission};
pub use crate::config::{CatalogConfig, MediaConfig, OwnerConfig, StoreConfig};
pub use crate::error::{CatalogError, CatalogResult};
pub use crate::media::{
  optimized_image_url, responsive_image_urls, validate_image_file, CloudinaryUploader, ImageFile, ImageUploader,
  ImageValidation, Transformation, UploadedImage,
};
pub use crate::model::{parse_features, NewProduct, Product, ProductDraft, ProductPatch};
pub use crate::pipeline::{ContextData, Pipeline, PipelineControl, PipelineError, PipelineResult};
pub use crate::store::{FirestoreBackend, InMemoryBackend, ProductBackend, ProductStore, DEFAULT_LATEST_LIMIT};
