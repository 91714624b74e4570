// vitrine/admin/src/state.rs
use crate::config::{AppConfig, StoreBackendKind};
use crate::errors::{AppError, Result};
use std::sync::Arc;
use vitrine::{
  CatalogController, CloudinaryUploader, FirestoreBackend, ImageUploader, InMemoryBackend, OwnerGate, ProductStore,
  SessionBook,
};

#[derive(Clone)]
pub struct AppState {
  pub controller: Arc<CatalogController>,
  pub store: ProductStore,
  pub gate: Arc<OwnerGate>,
  pub sessions: Arc<SessionBook>,
}

impl AppState {
  pub fn new(controller: CatalogController, gate: OwnerGate) -> Self {
    Self {
      store: controller.store().clone(),
      controller: Arc::new(controller),
      gate: Arc::new(gate),
      sessions: Arc::new(SessionBook::new()),
    }
  }

  /// Wires the configured backends together and seeds the displayed catalog
  /// from the store. A failed seed starts the catalog empty.
  pub async fn from_config(config: &AppConfig) -> Result<Self> {
    let store = match config.store_backend {
      StoreBackendKind::Firestore => {
        let store_config = config
          .store
          .clone()
          .ok_or_else(|| AppError::Config("Firestore backend selected without store settings".to_string()))?;
        ProductStore::new(FirestoreBackend::new(store_config))
      }
      StoreBackendKind::Memory => {
        tracing::warn!("Using the in-memory product store; products are lost on restart.");
        ProductStore::new(InMemoryBackend::new())
      }
    };

    let seeded = match store.list().await {
      Ok(products) => {
        tracing::info!(count = products.len(), "Catalog seeded from the store.");
        products
      }
      Err(e) => {
        tracing::error!(error = %e, "Failed to seed the catalog; starting empty.");
        Vec::new()
      }
    };

    let uploader: Arc<dyn ImageUploader> = Arc::new(CloudinaryUploader::new(&config.media));
    let controller = CatalogController::new(uploader, store)
      .with_image_folder(config.media.product_folder.clone())
      .with_products(seeded);

    Ok(Self::new(controller, OwnerGate::new(config.owner.clone())))
  }
}
