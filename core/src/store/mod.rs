// vitrine/src/store/mod.rs

//! Product persistence.
//!
//! A [`ProductBackend`] talks to the actual document collection and reports
//! every failure. [`ProductStore`] sits on top of it and is what the rest of
//! the crate uses: lookups and mutations degrade to `None`/`false` after
//! logging, while listings return a tagged `CatalogResult` so callers can tell
//! an empty catalog from a failed fetch.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreBackend;
pub use memory::InMemoryBackend;

use crate::error::CatalogResult;
use crate::model::{NewProduct, Product, ProductPatch};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, instrument};

/// Number of products returned by [`ProductStore::list_latest`] when the
/// caller has no preference.
pub const DEFAULT_LATEST_LIMIT: usize = 6;

/// Raw access to the products collection.
///
/// Backends own identifier and timestamp assignment: `create` sets `id`,
/// `createdAt` and `updatedAt`, `update` refreshes `updatedAt`.
#[async_trait]
pub trait ProductBackend: Send + Sync {
  /// Products ordered by descending creation time, at most `limit` of them.
  async fn list(&self, limit: Option<usize>) -> CatalogResult<Vec<Product>>;

  async fn get(&self, id: &str) -> CatalogResult<Option<Product>>;

  async fn create(&self, record: &NewProduct) -> CatalogResult<String>;

  /// Fails when no document with `id` exists.
  async fn update(&self, id: &str, patch: &ProductPatch) -> CatalogResult<()>;

  /// Hard delete. The hosted image is left alone.
  async fn delete(&self, id: &str) -> CatalogResult<()>;
}

/// The catalog's view of the products collection.
#[derive(Clone)]
pub struct ProductStore {
  backend: Arc<dyn ProductBackend>,
}

impl std::fmt::Debug for ProductStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ProductStore").finish_non_exhaustive()
  }
}

impl ProductStore {
  pub fn new(backend: impl ProductBackend + 'static) -> Self {
    Self {
      backend: Arc::new(backend),
    }
  }

  pub fn from_arc(backend: Arc<dyn ProductBackend>) -> Self {
    Self { backend }
  }

  /// All products, most recent first.
  #[instrument(name = "product_store::list", skip(self), err(Display))]
  pub async fn list(&self) -> CatalogResult<Vec<Product>> {
    self.backend.list(None).await.map_err(|e| {
      error!(error = %e, "Error fetching products.");
      e
    })
  }

  /// The `limit` most recently created products.
  #[instrument(name = "product_store::list_latest", skip(self), err(Display))]
  pub async fn list_latest(&self, limit: usize) -> CatalogResult<Vec<Product>> {
    self.backend.list(Some(limit)).await.map_err(|e| {
      error!(error = %e, "Error fetching latest products.");
      e
    })
  }

  /// Products whose category equals `category`, in `list()` order.
  ///
  /// Filters client-side after a full listing; there is no indexed query.
  #[instrument(name = "product_store::list_by_category", skip(self), err(Display))]
  pub async fn list_by_category(&self, category: &str) -> CatalogResult<Vec<Product>> {
    let products = self.backend.list(None).await.map_err(|e| {
      error!(error = %e, "Error fetching products by category.");
      e
    })?;
    Ok(products.into_iter().filter(|p| p.category == category).collect())
  }

  #[instrument(name = "product_store::get_by_id", skip(self))]
  pub async fn get_by_id(&self, id: &str) -> Option<Product> {
    match self.backend.get(id).await {
      Ok(found) => found,
      Err(e) => {
        error!(error = %e, "Error fetching product.");
        None
      }
    }
  }

  /// Persists `record`; returns the new identifier, or `None` on failure.
  #[instrument(name = "product_store::create", skip(self, record), fields(name = %record.name))]
  pub async fn create(&self, record: &NewProduct) -> Option<String> {
    match self.backend.create(record).await {
      Ok(id) => Some(id),
      Err(e) => {
        error!(error = %e, "Error adding product.");
        None
      }
    }
  }

  /// Writes the fields present in `patch` and refreshes `updatedAt`.
  /// Does not check that `id` exists first; a missing document yields `false`.
  #[instrument(name = "product_store::update", skip(self, patch))]
  pub async fn update(&self, id: &str, patch: &ProductPatch) -> bool {
    match self.backend.update(id, patch).await {
      Ok(()) => true,
      Err(e) => {
        error!(error = %e, "Error updating product.");
        false
      }
    }
  }

  #[instrument(name = "product_store::delete", skip(self))]
  pub async fn delete(&self, id: &str) -> bool {
    match self.backend.delete(id).await {
      Ok(()) => true,
      Err(e) => {
        error!(error = %e, "Error deleting product.");
        false
      }
    }
  }
}
