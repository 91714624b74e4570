// vitrine/src/catalog/context.rs

//! State carried through one add-product run, and the controller's status.

use crate::media::{ImageFile, UploadedImage};
use crate::model::{NewProduct, Product, ProductDraft};
use parking_lot::RwLock;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Where the add-product flow currently is. Runs only move forward:
/// `Idle → Validating → Uploading → Persisting → Merging → Idle`, with any
/// step able to end the attempt in `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddStage {
  Idle,
  Validating,
  Uploading,
  Persisting,
  Merging,
  Failed,
}

impl fmt::Display for AddStage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      AddStage::Idle => "idle",
      AddStage::Validating => "validating",
      AddStage::Uploading => "uploading",
      AddStage::Persisting => "persisting",
      AddStage::Merging => "merging",
      AddStage::Failed => "failed",
    };
    f.write_str(name)
  }
}

/// Snapshot of the controller for progress indicators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddStatus {
  pub stage: AddStage,
  /// Coarse percentage: 0, 50, 75, 100.
  pub progress: u8,
  pub last_error: Option<String>,
}

impl Default for AddStatus {
  fn default() -> Self {
    Self {
      stage: AddStage::Idle,
      progress: 0,
      last_error: None,
    }
  }
}

/// Shared, cheaply cloneable handle on the controller's [`AddStatus`].
#[derive(Debug, Clone, Default)]
pub struct StatusHandle(Arc<RwLock<AddStatus>>);

impl StatusHandle {
  pub fn snapshot(&self) -> AddStatus {
    self.0.read().clone()
  }

  pub fn begin(&self) {
    *self.0.write() = AddStatus {
      stage: AddStage::Validating,
      progress: 0,
      last_error: None,
    };
  }

  pub fn enter(&self, stage: AddStage) {
    self.0.write().stage = stage;
  }

  pub fn set_progress(&self, progress: u8) {
    self.0.write().progress = progress;
  }

  pub fn finish(&self) {
    *self.0.write() = AddStatus::default();
  }

  pub fn fail(&self, message: impl Into<String>) {
    *self.0.write() = AddStatus {
      stage: AddStage::Failed,
      progress: 0,
      last_error: Some(message.into()),
    };
  }
}

/// What the owner submitted: the form fields and the picked image, if any.
#[derive(Debug, Clone, Default)]
pub struct ProductSubmission {
  pub draft: ProductDraft,
  pub image: Option<ImageFile>,
}

impl ProductSubmission {
  pub fn new(draft: ProductDraft, image: Option<ImageFile>) -> Self {
    Self { draft, image }
  }
}

/// Data threaded through the add-product pipeline. Each step fills in the
/// field the next one needs.
#[derive(Debug)]
pub struct AddProductCtxData {
  pub submission: ProductSubmission,
  /// Media host folder tag for the upload.
  pub folder: String,
  pub uploaded: Option<UploadedImage>,
  pub record: Option<NewProduct>,
  pub product_id: Option<String>,
  pub product: Option<Product>,
}

impl AddProductCtxData {
  pub fn new(submission: ProductSubmission, folder: impl Into<String>) -> Self {
    Self {
      submission,
      folder: folder.into(),
      uploaded: None,
      record: None,
      product_id: None,
      product: None,
    }
  }
}
