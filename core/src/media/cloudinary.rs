// vitrine/src/media/cloudinary.rs

//! Unsigned uploads to Cloudinary.

use crate::config::MediaConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::media::uploader::{ImageUploader, UploadedImage};
use crate::media::validator::ImageFile;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{error, info, instrument};

#[derive(Debug, Deserialize)]
struct UploadResponse {
  secure_url: Option<String>,
  public_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
  error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
  message: String,
}

/// Posts `file`, `upload_preset` and `folder` as a multipart form to
/// `{api_base}/{cloud_name}/image/upload`.
#[derive(Debug, Clone)]
pub struct CloudinaryUploader {
  client: reqwest::Client,
  upload_url: String,
  upload_preset: String,
}

impl CloudinaryUploader {
  pub fn new(config: &MediaConfig) -> Self {
    Self::with_client(reqwest::Client::new(), config)
  }

  pub fn with_client(client: reqwest::Client, config: &MediaConfig) -> Self {
    Self {
      client,
      upload_url: config.upload_url(),
      upload_preset: config.upload_preset.clone(),
    }
  }

  pub fn upload_url(&self) -> &str {
    &self.upload_url
  }
}

fn upload_error(message: impl Into<String>) -> CatalogError {
  let message = message.into();
  error!(error = %message, "Error uploading image.");
  CatalogError::Upload(message)
}

#[async_trait]
impl ImageUploader for CloudinaryUploader {
  #[instrument(name = "cloudinary::upload", skip(self, file), fields(file = %file.file_name, size = file.size(), %folder))]
  async fn upload(&self, file: &ImageFile, folder: &str) -> CatalogResult<UploadedImage> {
    let part = Part::bytes(file.bytes.clone())
      .file_name(file.file_name.clone())
      .mime_str(&file.content_type)
      .map_err(|e| upload_error(format!("Invalid content type '{}': {}", file.content_type, e)))?;

    let form = Form::new()
      .part("file", part)
      .text("upload_preset", self.upload_preset.clone())
      .text("folder", folder.to_string());

    let response = self
      .client
      .post(&self.upload_url)
      .multipart(form)
      .send()
      .await
      .map_err(|e| upload_error(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      let reason = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown status").to_string());
      return Err(upload_error(format!("Upload failed: {} ({})", reason, status.as_u16())));
    }

    let parsed: UploadResponse = response
      .json()
      .await
      .map_err(|e| upload_error(format!("Malformed upload response: {}", e)))?;

    match (parsed.secure_url, parsed.public_id) {
      (Some(url), Some(public_id)) => {
        info!(%public_id, "Image uploaded.");
        Ok(UploadedImage { url, public_id })
      }
      _ => Err(upload_error("Upload response is missing secure_url or public_id")),
    }
  }
}
