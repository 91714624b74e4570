// vitrine/admin/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use vitrine::{MediaConfig, OwnerConfig, StoreConfig};

/// Where products are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackendKind {
  Firestore,
  /// In-process collection, lost on restart. For local runs.
  Memory,
}

impl FromStr for StoreBackendKind {
  type Err = AppError;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "firestore" => Ok(StoreBackendKind::Firestore),
      "memory" => Ok(StoreBackendKind::Memory),
      other => Err(AppError::Config(format!(
        "Invalid STORE_BACKEND '{}': expected 'firestore' or 'memory'",
        other
      ))),
    }
  }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub store_backend: StoreBackendKind,
  pub media: MediaConfig,
  /// Present when `store_backend` is `Firestore`.
  pub store: Option<StoreConfig>,
  pub owner: OwnerConfig,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok();

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let store_backend = get_env("STORE_BACKEND")
      .unwrap_or_else(|_| "firestore".to_string())
      .parse::<StoreBackendKind>()?;

    let media = MediaConfig::from_env()?;
    let store = match store_backend {
      StoreBackendKind::Firestore => Some(StoreConfig::from_env()?),
      StoreBackendKind::Memory => None,
    };
    let owner = OwnerConfig::from_env()?;

    tracing::info!(
      %server_host,
      server_port,
      ?store_backend,
      cloud_name = %media.cloud_name,
      "Application configuration loaded successfully."
    );

    Ok(Self {
      server_host,
      server_port,
      store_backend,
      media,
      store,
      owner,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}
