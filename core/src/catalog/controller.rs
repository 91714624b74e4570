// vitrine/src/catalog/controller.rs

use crate::catalog::context::{AddProductCtxData, AddStage, AddStatus, ProductSubmission, StatusHandle};
use crate::catalog::steps;
use crate::config::DEFAULT_PRODUCT_FOLDER;
use crate::error::{CatalogError, CatalogResult};
use crate::media::ImageUploader;
use crate::model::{Product, ProductPatch};
use crate::pipeline::{ContextData, Pipeline, PipelineResult};
use crate::store::ProductStore;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

type AddProductPipeline = Pipeline<AddStage, AddProductCtxData, CatalogError>;

/// Drives the owner's add/update/delete operations and keeps the list of
/// products currently on display.
///
/// At most one add-product run is in flight at a time; a second caller gets
/// [`CatalogError::Busy`]. The displayed list only grows by appending the
/// product a successful run produced.
pub struct CatalogController {
  store: ProductStore,
  displayed: Arc<RwLock<Vec<Product>>>,
  status: StatusHandle,
  in_flight: AtomicBool,
  folder: String,
  pipeline: AddProductPipeline,
}

impl std::fmt::Debug for CatalogController {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CatalogController")
      .field("folder", &self.folder)
      .field("status", &self.status.snapshot())
      .field("displayed", &self.displayed.read().len())
      .finish_non_exhaustive()
  }
}

/// Clears the in-flight flag when the run ends, however it ends.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
  fn acquire(flag: &'a AtomicBool) -> Option<Self> {
    flag
      .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
      .ok()
      .map(|_| InFlightGuard(flag))
  }
}

impl Drop for InFlightGuard<'_> {
  fn drop(&mut self) {
    self.0.store(false, Ordering::Release);
  }
}

impl CatalogController {
  pub fn new(uploader: Arc<dyn ImageUploader>, store: ProductStore) -> Self {
    let displayed = Arc::new(RwLock::new(Vec::new()));
    let status = StatusHandle::default();
    let pipeline = build_pipeline(uploader, store.clone(), displayed.clone(), status.clone());

    Self {
      store,
      displayed,
      status,
      in_flight: AtomicBool::new(false),
      folder: DEFAULT_PRODUCT_FOLDER.to_string(),
      pipeline,
    }
  }

  /// Media host folder images are uploaded into.
  pub fn with_image_folder(mut self, folder: impl Into<String>) -> Self {
    self.folder = folder.into();
    self
  }

  /// Seeds the displayed list, typically with the result of `ProductStore::list`.
  pub fn with_products(self, products: Vec<Product>) -> Self {
    *self.displayed.write() = products;
    self
  }

  pub fn products(&self) -> Vec<Product> {
    self.displayed.read().clone()
  }

  pub fn status(&self) -> AddStatus {
    self.status.snapshot()
  }

  pub fn is_busy(&self) -> bool {
    self.in_flight.load(Ordering::Acquire)
  }

  pub fn store(&self) -> &ProductStore {
    &self.store
  }

  /// Validates the image, uploads it, persists the product, then appends it
  /// to the displayed list. Any failure leaves the list untouched.
  #[instrument(name = "catalog::add_product", skip(self, submission), fields(name = %submission.draft.name), err(Display))]
  pub async fn add_product(&self, authorized: bool, submission: ProductSubmission) -> CatalogResult<Product> {
    require_owner(authorized)?;
    let _guard = InFlightGuard::acquire(&self.in_flight).ok_or_else(|| {
      warn!("Add-product rejected, another run is in flight.");
      CatalogError::Busy
    })?;

    self.status.begin();
    let ctx = ContextData::new(AddProductCtxData::new(submission, self.folder.clone()));

    let outcome = match self.pipeline.run(ctx.clone()).await {
      Ok(PipelineResult::Completed) => ctx
        .write()
        .product
        .take()
        .ok_or_else(|| CatalogError::Internal("pipeline completed without a product".to_string())),
      Ok(PipelineResult::Stopped) => Err(CatalogError::Internal("add-product pipeline stopped early".to_string())),
      Err(e) => Err(e),
    };

    match &outcome {
      Ok(product) => {
        info!(product_id = %product.id, "Product added.");
        self.status.finish();
      }
      Err(e) => {
        error!(error = %e, "Add-product failed.");
        self.status.fail(e.to_string());
      }
    }
    outcome
  }

  /// Applies `patch` to the stored product. The displayed list is not touched.
  #[instrument(name = "catalog::update_product", skip(self, patch), err(Display))]
  pub async fn update_product(&self, authorized: bool, id: &str, patch: &ProductPatch) -> CatalogResult<()> {
    require_owner(authorized)?;
    if self.store.update(id, patch).await {
      Ok(())
    } else {
      Err(CatalogError::Store(format!("Failed to update product {}", id)))
    }
  }

  /// Removes the stored product. The displayed list is not touched.
  #[instrument(name = "catalog::delete_product", skip(self), err(Display))]
  pub async fn delete_product(&self, authorized: bool, id: &str) -> CatalogResult<()> {
    require_owner(authorized)?;
    if self.store.delete(id).await {
      Ok(())
    } else {
      Err(CatalogError::Store(format!("Failed to delete product {}", id)))
    }
  }
}

fn require_owner(authorized: bool) -> CatalogResult<()> {
  if authorized {
    Ok(())
  } else {
    Err(CatalogError::Unauthorized("owner session required".to_string()))
  }
}

fn build_pipeline(
  uploader: Arc<dyn ImageUploader>,
  store: ProductStore,
  displayed: Arc<RwLock<Vec<Product>>>,
  status: StatusHandle,
) -> AddProductPipeline {
  let mut pipeline = AddProductPipeline::new(&[
    (AddStage::Validating, false),
    (AddStage::Uploading, false),
    (AddStage::Persisting, false),
    (AddStage::Merging, false),
  ]);

  let observed = status.clone();
  pipeline.observe_steps(move |stage, _ctx| observed.enter(stage));

  pipeline.on(AddStage::Validating, steps::validate_submission);

  pipeline.on(AddStage::Uploading, move |ctx| steps::upload_image(ctx, uploader.clone()));
  let after_upload = status.clone();
  pipeline.after(AddStage::Uploading, move |_ctx| steps::report_progress(after_upload.clone(), 50));

  pipeline.before(AddStage::Persisting, steps::build_record);
  let after_build = status.clone();
  pipeline.before(AddStage::Persisting, move |_ctx| steps::report_progress(after_build.clone(), 75));
  pipeline.on(AddStage::Persisting, move |ctx| steps::persist_record(ctx, store.clone()));
  pipeline.after(AddStage::Persisting, move |_ctx| steps::report_progress(status.clone(), 100));

  pipeline.on(AddStage::Merging, move |ctx| steps::merge_product(ctx, displayed.clone()));

  pipeline
}
