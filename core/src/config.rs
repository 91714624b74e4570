// vitrine/src/config.rs

use crate::auth::hash_password;
use crate::error::{CatalogError, CatalogResult};
use chrono::Duration;
use dotenvy::dotenv;
use std::env;

pub const DEFAULT_CLOUDINARY_API_BASE: &str = "https://api.cloudinary.com/v1_1";
pub const DEFAULT_FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";
pub const DEFAULT_PRODUCT_FOLDER: &str = "products";
pub const DEFAULT_PRODUCTS_COLLECTION: &str = "products";
pub const DEFAULT_SESSION_HOURS: i64 = 24;

/// Settings for the hosted media service.
#[derive(Debug, Clone)]
pub struct MediaConfig {
  pub cloud_name: String,
  pub upload_preset: String,
  pub api_base: String,
  /// Folder tag product images are uploaded into.
  pub product_folder: String,
}

impl MediaConfig {
  pub fn upload_url(&self) -> String {
    format!("{}/{}/image/upload", self.api_base.trim_end_matches('/'), self.cloud_name)
  }
}

/// Settings for the remote document store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
  pub project_id: String,
  pub api_key: Option<String>,
  pub base_url: String,
  pub collection: String,
}

impl StoreConfig {
  /// `.../projects/{p}/databases/(default)/documents`
  pub fn documents_root(&self) -> String {
    format!(
      "{}/projects/{}/databases/(default)/documents",
      self.base_url.trim_end_matches('/'),
      self.project_id
    )
  }
}

/// Owner gate settings. The password is only ever held as an argon2 hash.
#[derive(Clone)]
pub struct OwnerConfig {
  pub password_hash: String,
  pub session_duration: Duration,
}

impl std::fmt::Debug for OwnerConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("OwnerConfig")
      .field("password_hash", &"[REDACTED]")
      .field("session_duration", &self.session_duration)
      .finish()
  }
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
  pub media: MediaConfig,
  pub store: StoreConfig,
  pub owner: OwnerConfig,
}

fn get_env(var_name: &str) -> CatalogResult<String> {
  env::var(var_name)
    .map_err(|e| CatalogError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
}

impl MediaConfig {
  pub fn from_env() -> CatalogResult<Self> {
    Ok(Self {
      cloud_name: get_env("CLOUDINARY_CLOUD_NAME")?,
      upload_preset: get_env("CLOUDINARY_UPLOAD_PRESET")?,
      api_base: get_env("CLOUDINARY_API_BASE").unwrap_or_else(|_| DEFAULT_CLOUDINARY_API_BASE.to_string()),
      product_folder: get_env("PRODUCT_IMAGE_FOLDER").unwrap_or_else(|_| DEFAULT_PRODUCT_FOLDER.to_string()),
    })
  }
}

impl StoreConfig {
  pub fn from_env() -> CatalogResult<Self> {
    Ok(Self {
      project_id: get_env("FIRESTORE_PROJECT_ID")?,
      api_key: get_env("FIRESTORE_API_KEY").ok().filter(|k| !k.is_empty()),
      base_url: get_env("FIRESTORE_BASE_URL").unwrap_or_else(|_| DEFAULT_FIRESTORE_BASE_URL.to_string()),
      collection: get_env("PRODUCTS_COLLECTION").unwrap_or_else(|_| DEFAULT_PRODUCTS_COLLECTION.to_string()),
    })
  }
}

impl OwnerConfig {
  pub fn from_env() -> CatalogResult<Self> {
    let password_hash = match get_env("OWNER_PASSWORD_HASH") {
      Ok(hash) => hash,
      Err(_) => {
        let plain = get_env("OWNER_PASSWORD")
          .map_err(|_| CatalogError::Config("Either OWNER_PASSWORD_HASH or OWNER_PASSWORD must be set".to_string()))?;
        tracing::warn!("OWNER_PASSWORD is set in plain text; prefer OWNER_PASSWORD_HASH.");
        hash_password(&plain)?
      }
    };

    let hours = get_env("OWNER_SESSION_HOURS")
      .unwrap_or_else(|_| DEFAULT_SESSION_HOURS.to_string())
      .parse::<i64>()
      .map_err(|e| CatalogError::Config(format!("Invalid OWNER_SESSION_HOURS: {}", e)))?;
    if hours <= 0 {
      return Err(CatalogError::Config("OWNER_SESSION_HOURS must be positive".to_string()));
    }

    Ok(Self {
      password_hash,
      session_duration: Duration::hours(hours),
    })
  }
}

impl CatalogConfig {
  /// Loads `.env` if present, then reads every section from the environment.
  pub fn from_env() -> CatalogResult<Self> {
    dotenv().ok();

    let config = Self {
      media: MediaConfig::from_env()?,
      store: StoreConfig::from_env()?,
      owner: OwnerConfig::from_env()?,
    };

    tracing::info!(
      cloud_name = %config.media.cloud_name,
      project_id = %config.store.project_id,
      collection = %config.store.collection,
      "Catalog configuration loaded."
    );
    Ok(config)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn upload_url_joins_base_and_cloud_name() {
    let media = MediaConfig {
      cloud_name: "demo".into(),
      upload_preset: "unsigned".into(),
      api_base: "https://api.cloudinary.com/v1_1/".into(),
      product_folder: DEFAULT_PRODUCT_FOLDER.into(),
    };
    assert_eq!(media.upload_url(), "https://api.cloudinary.com/v1_1/demo/image/upload");
  }

  #[test]
  fn documents_root_uses_default_database() {
    let store = StoreConfig {
      project_id: "portfolio".into(),
      api_key: None,
      base_url: DEFAULT_FIRESTORE_BASE_URL.into(),
      collection: "products".into(),
    };
    assert_eq!(
      store.documents_root(),
      "https://firestore.googleapis.com/v1/projects/portfolio/databases/(default)/documents"
    );
  }

  #[test]
  fn owner_config_debug_hides_hash() {
    let owner = OwnerConfig {
      password_hash: "$argon2id$secret".into(),
      session_duration: Duration::hours(1),
    };
    assert!(!format!("{:?}", owner).contains("secret"));
  }
}
