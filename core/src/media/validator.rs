// vitrine/src/media/validator.rs

use crate::error::{CatalogError, CatalogResult};
use std::fmt;

/// Largest accepted image, in bytes (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

pub const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/webp", "image/gif"];

/// An image picked by the owner, held in memory until it is uploaded.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
  pub file_name: String,
  /// MIME type as reported by the client.
  pub content_type: String,
  pub bytes: Vec<u8>,
}

impl ImageFile {
  pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
    Self {
      file_name: file_name.into(),
      content_type: content_type.into(),
      bytes,
    }
  }

  pub fn size(&self) -> usize {
    self.bytes.len()
  }

  /// Lowercased MIME essence, without parameters.
  fn mime_essence(&self) -> String {
    self
      .content_type
      .split(';')
      .next()
      .unwrap_or_default()
      .trim()
      .to_ascii_lowercase()
  }
}

// The payload can be megabytes; keep it out of logs.
impl fmt::Debug for ImageFile {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ImageFile")
      .field("file_name", &self.file_name)
      .field("content_type", &self.content_type)
      .field("size", &self.bytes.len())
      .finish()
  }
}

/// Result of [`validate_image_file`]: a verdict plus a human readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageValidation {
  pub valid: bool,
  pub error: Option<String>,
}

impl ImageValidation {
  fn accepted() -> Self {
    Self { valid: true, error: None }
  }

  fn rejected(reason: &str) -> Self {
    Self {
      valid: false,
      error: Some(reason.to_string()),
    }
  }

  pub fn into_result(self) -> CatalogResult<()> {
    if self.valid {
      Ok(())
    } else {
      Err(CatalogError::Validation(
        self.error.unwrap_or_else(|| "Invalid image".to_string()),
      ))
    }
  }
}

/// Checks size and type before anything is sent over the network.
/// Never fails: a bad file yields `valid == false` with a reason.
pub fn validate_image_file(file: &ImageFile) -> ImageValidation {
  if file.size() > MAX_IMAGE_BYTES {
    return ImageValidation::rejected("File size must be less than 5MB");
  }

  let essence = file.mime_essence();
  if !ALLOWED_IMAGE_TYPES.contains(&essence.as_str()) {
    return ImageValidation::rejected("Only JPEG, PNG, WebP, and GIF files are allowed");
  }

  ImageValidation::accepted()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn file(content_type: &str, size: usize) -> ImageFile {
    ImageFile::new("photo", content_type, vec![0u8; size])
  }

  #[test]
  fn accepts_every_allowed_type_within_limit() {
    for ty in ALLOWED_IMAGE_TYPES {
      let verdict = validate_image_file(&file(ty, 1024));
      assert!(verdict.valid, "{} should be accepted", ty);
      assert!(verdict.error.is_none());
    }
  }

  #[test]
  fn accepts_exactly_five_mib() {
    assert!(validate_image_file(&file("image/png", MAX_IMAGE_BYTES)).valid);
  }

  #[test]
  fn rejects_oversized_file() {
    let verdict = validate_image_file(&file("image/jpeg", MAX_IMAGE_BYTES + 1));
    assert!(!verdict.valid);
    assert_eq!(verdict.error.as_deref(), Some("File size must be less than 5MB"));
  }

  #[test]
  fn rejects_unsupported_types() {
    for ty in ["image/svg+xml", "application/pdf", "", "text/plain", "image/bmp"] {
      let verdict = validate_image_file(&file(ty, 10));
      assert!(!verdict.valid, "{} should be rejected", ty);
      assert!(!verdict.error.unwrap_or_default().is_empty());
    }
  }

  #[test]
  fn mime_parameters_and_case_are_ignored() {
    assert!(validate_image_file(&file("Image/PNG; charset=binary", 10)).valid);
  }

  #[test]
  fn rejected_verdict_converts_to_validation_error() {
    let err = validate_image_file(&file("text/plain", 1)).into_result().unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)));
  }

  #[test]
  fn debug_output_omits_bytes() {
    let rendered = format!("{:?}", file("image/gif", 3));
    assert!(rendered.contains("size: 3"));
    assert!(!rendered.contains("bytes"));
  }
}
