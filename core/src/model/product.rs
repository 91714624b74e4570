// vitrine/src/model/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted catalog entry.
///
/// `id`, `created_at` and `updated_at` are assigned by the store; a `Product`
/// has an `id` exactly when it has been persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id: String,
  pub name: String,
  pub category: String,
  pub description: String,
  /// Fully resolved URL of the hosted image.
  pub image: String,
  pub link: String,
  pub price: String,
  pub rating: f64,
  pub features: Vec<String>,
  /// Free-form display strings, never parsed by the core.
  pub downloads: String,
  pub revenue: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub created_at: Option<DateTime<Utc>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub updated_at: Option<DateTime<Utc>>,
}

/// A product record ready to be persisted: everything but the store-assigned
/// identifier and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
  pub name: String,
  pub category: String,
  pub description: String,
  pub image: String,
  pub link: String,
  pub price: String,
  pub rating: f64,
  pub features: Vec<String>,
  pub downloads: String,
  pub revenue: String,
}

impl NewProduct {
  /// Builds the record for a freshly added product from the owner's form input
  /// and the URL the media host returned.
  pub fn from_draft(draft: &ProductDraft, image_url: impl Into<String>) -> Self {
    Self {
      name: draft.name.clone(),
      category: draft.category.clone(),
      description: draft.description.clone(),
      image: image_url.into(),
      link: draft.link.clone(),
      price: draft.price.clone(),
      rating: 0.0,
      features: parse_features(&draft.features),
      downloads: "0".to_string(),
      revenue: "$0".to_string(),
    }
  }

  /// Attaches the identifier the store assigned. Timestamps stay unset until
  /// the product is read back from the store.
  pub fn into_product(self, id: impl Into<String>) -> Product {
    Product {
      id: id.into(),
      name: self.name,
      category: self.category,
      description: self.description,
      image: self.image,
      link: self.link,
      price: self.price,
      rating: self.rating,
      features: self.features,
      downloads: self.downloads,
      revenue: self.revenue,
      created_at: None,
      updated_at: None,
    }
  }
}

/// Raw add-product form input. `features` is the comma-separated text field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
  pub name: String,
  pub category: String,
  pub description: String,
  pub price: String,
  pub features: String,
  pub link: String,
}

/// A partial update. Only the fields that are `Some` are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub image: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub link: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub price: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub rating: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub features: Option<Vec<String>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub downloads: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub revenue: Option<String>,
}

impl ProductPatch {
  pub fn is_empty(&self) -> bool {
    self.field_names().is_empty()
  }

  /// Document field names touched by this patch, in declaration order.
  pub fn field_names(&self) -> Vec<&'static str> {
    let mut names = Vec::new();
    if self.name.is_some() {
      names.push("name");
    }
    if self.category.is_some() {
      names.push("category");
    }
    if self.description.is_some() {
      names.push("description");
    }
    if self.image.is_some() {
      names.push("image");
    }
    if self.link.is_some() {
      names.push("link");
    }
    if self.price.is_some() {
      names.push("price");
    }
    if self.rating.is_some() {
      names.push("rating");
    }
    if self.features.is_some() {
      names.push("features");
    }
    if self.downloads.is_some() {
      names.push("downloads");
    }
    if self.revenue.is_some() {
      names.push("revenue");
    }
    names
  }

  /// Writes the present fields over `product`.
  pub fn apply_to(&self, product: &mut Product) {
    if let Some(v) = &self.name {
      product.name = v.clone();
    }
    if let Some(v) = &self.category {
      product.category = v.clone();
    }
    if let Some(v) = &self.description {
      product.description = v.clone();
    }
    if let Some(v) = &self.image {
      product.image = v.clone();
    }
    if let Some(v) = &self.link {
      product.link = v.clone();
    }
    if let Some(v) = &self.price {
      product.price = v.clone();
    }
    if let Some(v) = self.rating {
      product.rating = v;
    }
    if let Some(v) = &self.features {
      product.features = v.clone();
    }
    if let Some(v) = &self.downloads {
      product.downloads = v.clone();
    }
    if let Some(v) = &self.revenue {
      product.revenue = v.clone();
    }
  }
}

/// Splits comma-separated feature text into trimmed, non-empty entries.
/// Order and duplicates are preserved.
pub fn parse_features(raw: &str) -> Vec<String> {
  raw
    .split(',')
    .map(str::trim)
    .filter(|f| !f.is_empty())
    .map(str::to_string)
    .collect()
}
