// vitrine/src/error.rs
use crate::pipeline::PipelineError;
use thiserror::Error;

/// Every failure the catalog core can report to its caller.
#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("Image validation failed: {0}")]
  Validation(String),

  #[error("Please select an image for the product")]
  MissingImage,

  #[error("Image upload failed: {0}")]
  Upload(String),

  #[error("Document store error: {0}")]
  Store(String),

  #[error("Failed to add product to database")]
  NotPersisted,

  #[error("Unauthorized: {0}")]
  Unauthorized(String),

  #[error("An add-product operation is already in flight")]
  Busy,

  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Pipeline error: {source}")]
  Pipeline {
    #[from]
    source: PipelineError,
  },

  #[error("Internal error: {0}")]
  Internal(String),
}

impl CatalogError {
  /// True for failures of a remote service (media host or document store).
  pub fn is_transport(&self) -> bool {
    matches!(self, CatalogError::Upload(_) | CatalogError::Store(_) | CatalogError::NotPersisted)
  }
}

impl From<reqwest::Error> for CatalogError {
  fn from(err: reqwest::Error) -> Self {
    CatalogError::Store(err.to_string())
  }
}

impl From<serde_json::Error> for CatalogError {
  fn from(err: serde_json::Error) -> Self {
    CatalogError::Store(format!("malformed response: {}", err))
  }
}

pub type CatalogResult<T, E = CatalogError> = std::result::Result<T, E>;
