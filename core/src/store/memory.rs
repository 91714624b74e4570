// vitrine/src/store/memory.rs

//! An in-process products collection, used for local runs and tests.

use crate::error::{CatalogError, CatalogResult};
use crate::model::{NewProduct, Product, ProductPatch};
use crate::store::ProductBackend;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct InMemoryBackend {
  docs: RwLock<Vec<Product>>,
  last_timestamp: Mutex<Option<DateTime<Utc>>>,
}

impl InMemoryBackend {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.docs.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.docs.read().is_empty()
  }

  /// Stand-in for a server timestamp. Strictly increasing, so an update is
  /// always observably later than the write before it.
  fn server_timestamp(&self) -> DateTime<Utc> {
    let mut last = self.last_timestamp.lock();
    let now = Utc::now();
    let next = match *last {
      Some(prev) if now <= prev => prev + Duration::microseconds(1),
      _ => now,
    };
    *last = Some(next);
    next
  }
}

#[async_trait]
impl ProductBackend for InMemoryBackend {
  async fn list(&self, limit: Option<usize>) -> CatalogResult<Vec<Product>> {
    let mut products = self.docs.read().clone();
    products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    if let Some(limit) = limit {
      products.truncate(limit);
    }
    Ok(products)
  }

  async fn get(&self, id: &str) -> CatalogResult<Option<Product>> {
    Ok(self.docs.read().iter().find(|p| p.id == id).cloned())
  }

  async fn create(&self, record: &NewProduct) -> CatalogResult<String> {
    let id = Uuid::new_v4().simple().to_string();
    let now = self.server_timestamp();
    let mut product = record.clone().into_product(id.clone());
    product.created_at = Some(now);
    product.updated_at = Some(now);
    self.docs.write().push(product);
    Ok(id)
  }

  async fn update(&self, id: &str, patch: &ProductPatch) -> CatalogResult<()> {
    let now = self.server_timestamp();
    let mut docs = self.docs.write();
    let product = docs
      .iter_mut()
      .find(|p| p.id == id)
      .ok_or_else(|| CatalogError::Store(format!("No document to update: products/{}", id)))?;
    patch.apply_to(product);
    product.updated_at = Some(now);
    Ok(())
  }

  async fn delete(&self, id: &str) -> CatalogResult<()> {
    self.docs.write().retain(|p| p.id != id);
    Ok(())
  }
}
