// vitrine/src/catalog/steps.rs

//! Handlers for the add-product pipeline. Each one reads what it needs out of
//! the context, releases the lock, then does its I/O.

use crate::catalog::context::{AddProductCtxData, StatusHandle};
use crate::error::{CatalogError, CatalogResult};
use crate::media::{validate_image_file, ImageUploader};
use crate::model::{NewProduct, Product};
use crate::pipeline::{ContextData, PipelineControl};
use crate::store::ProductStore;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Validating: an image must be present and acceptable.
#[instrument(name = "add_product::validate", skip_all)]
pub async fn validate_submission(ctx: ContextData<AddProductCtxData>) -> CatalogResult<PipelineControl> {
  let guard = ctx.read();
  let image = guard.submission.image.as_ref().ok_or(CatalogError::MissingImage)?;
  validate_image_file(image).into_result()?;
  Ok(PipelineControl::Continue)
}

/// Uploading: sends the image to the media host.
#[instrument(name = "add_product::upload", skip_all)]
pub async fn upload_image(
  ctx: ContextData<AddProductCtxData>,
  uploader: Arc<dyn ImageUploader>,
) -> CatalogResult<PipelineControl> {
  let (image, folder) = {
    let guard = ctx.read();
    let image = guard.submission.image.clone().ok_or(CatalogError::MissingImage)?;
    (image, guard.folder.clone())
  };

  let uploaded = uploader.upload(&image, &folder).await?;
  info!(public_id = %uploaded.public_id, "Product image uploaded.");
  ctx.write().uploaded = Some(uploaded);
  Ok(PipelineControl::Continue)
}

/// Sets the status progress once a phase is through.
pub async fn report_progress(status: StatusHandle, progress: u8) -> CatalogResult<PipelineControl> {
  status.set_progress(progress);
  Ok(PipelineControl::Continue)
}

/// Persisting (before): assembles the document from the draft and the image URL.
pub async fn build_record(ctx: ContextData<AddProductCtxData>) -> CatalogResult<PipelineControl> {
  let mut guard = ctx.write();
  let url = guard
    .uploaded
    .as_ref()
    .map(|u| u.url.clone())
    .ok_or_else(|| CatalogError::Internal("no uploaded image to attach".to_string()))?;
  let record = NewProduct::from_draft(&guard.submission.draft, url);
  guard.record = Some(record);
  Ok(PipelineControl::Continue)
}

/// Persisting: writes the document. The uploaded image is not removed when
/// this fails; its public id is logged instead.
#[instrument(name = "add_product::persist", skip_all)]
pub async fn persist_record(ctx: ContextData<AddProductCtxData>, store: ProductStore) -> CatalogResult<PipelineControl> {
  let record = ctx
    .read()
    .record
    .clone()
    .ok_or_else(|| CatalogError::Internal("product record was not built".to_string()))?;

  match store.create(&record).await {
    Some(id) => {
      info!(product_id = %id, "Product persisted.");
      ctx.write().product_id = Some(id);
      Ok(PipelineControl::Continue)
    }
    None => {
      let public_id = ctx.read().uploaded.as_ref().map(|u| u.public_id.clone()).unwrap_or_default();
      warn!(public_id = %public_id, "Product not persisted; uploaded image is orphaned.");
      Err(CatalogError::NotPersisted)
    }
  }
}

/// Merging: appends the new product to the displayed list.
pub async fn merge_product(
  ctx: ContextData<AddProductCtxData>,
  displayed: Arc<RwLock<Vec<Product>>>,
) -> CatalogResult<PipelineControl> {
  let mut guard = ctx.write();
  let id = guard
    .product_id
    .clone()
    .ok_or_else(|| CatalogError::Internal("product id missing after persist".to_string()))?;
  let record = guard
    .record
    .take()
    .ok_or_else(|| CatalogError::Internal("product record missing after persist".to_string()))?;
  let product = record.into_product(id);
  displayed.write().push(product.clone());
  guard.product = Some(product);
  Ok(PipelineControl::Continue)
}
