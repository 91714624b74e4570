// vitrine/src/media/uploader.rs

use crate::error::CatalogResult;
use crate::media::validator::ImageFile;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A durable, publicly addressable asset on the media host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
  pub url: String,
  pub public_id: String,
}

/// Sends images to an external media host.
///
/// Callers validate with [`crate::media::validate_image_file`] first; uploaders
/// do not re-check. One attempt per call, no retries.
#[async_trait]
pub trait ImageUploader: Send + Sync {
  /// Uploads `file` under the `folder` tag. Any transport failure or non-2xx
  /// answer becomes `CatalogError::Upload` with a descriptive message.
  async fn upload(&self, file: &ImageFile, folder: &str) -> CatalogResult<UploadedImage>;

  /// Placeholder: deleting hosted assets needs a signed server-side request,
  /// so this only logs and reports success. Do not rely on it.
  async fn delete(&self, public_id: &str) -> bool {
    tracing::info!(%public_id, "Image deletion requires a signed server-side request; nothing was deleted.");
    true
  }
}
