// vitrine/src/media/transform.rs

//! Delivery-time resizing for hosted images.

use serde::Serialize;

/// Named resize presets understood by the media host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transformation {
  Thumbnail,
  #[default]
  Medium,
  Large,
}

impl Transformation {
  pub fn as_str(self) -> &'static str {
    match self {
      Transformation::Thumbnail => "w_300,h_300,c_fill,g_auto",
      Transformation::Medium => "w_600,h_400,c_fill,g_auto",
      Transformation::Large => "w_800,h_600,c_fill,g_auto",
    }
  }
}

/// Inserts `transformation` right after `/upload/`. URLs not served by the
/// media host (or without an `/upload/` segment) come back unchanged.
pub fn optimized_image_url(original_url: &str, transformation: Transformation) -> String {
  if !original_url.contains("cloudinary.com") {
    return original_url.to_string();
  }
  match original_url.split_once("/upload/") {
    Some((base, image_path)) => format!("{}/upload/{}/{}", base, transformation.as_str(), image_path),
    None => original_url.to_string(),
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponsiveImageUrls {
  pub thumbnail: String,
  pub medium: String,
  pub large: String,
  pub original: String,
}

pub fn responsive_image_urls(original_url: &str) -> ResponsiveImageUrls {
  ResponsiveImageUrls {
    thumbnail: optimized_image_url(original_url, Transformation::Thumbnail),
    medium: optimized_image_url(original_url, Transformation::Medium),
    large: optimized_image_url(original_url, Transformation::Large),
    original: original_url.to_string(),
  }
}
