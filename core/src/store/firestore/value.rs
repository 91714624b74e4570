// vitrine/src/store/firestore/value.rs

//! Conversion between products and Firestore's typed JSON values
//! (`{"stringValue": ..}`, `{"arrayValue": {"values": [..]}}`, ...).

use crate::error::{CatalogError, CatalogResult};
use crate::model::{NewProduct, Product, ProductPatch};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Map, Value};

/// A document as returned by the REST API.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Document {
  /// Full resource name; the last path segment is the document id.
  pub name: String,
  #[serde(default)]
  pub fields: Map<String, Value>,
}

impl Document {
  pub fn id(&self) -> &str {
    self.name.rsplit('/').next().unwrap_or_default()
  }
}

fn string_value(s: &str) -> Value {
  json!({ "stringValue": s })
}

fn array_value(items: &[String]) -> Value {
  if items.is_empty() {
    return json!({ "arrayValue": {} });
  }
  let values: Vec<Value> = items.iter().map(|s| string_value(s)).collect();
  json!({ "arrayValue": { "values": values } })
}

fn double_value(n: f64) -> Value {
  json!({ "doubleValue": n })
}

pub(crate) fn encode_new_product(record: &NewProduct) -> Map<String, Value> {
  let mut fields = Map::new();
  fields.insert("name".into(), string_value(&record.name));
  fields.insert("category".into(), string_value(&record.category));
  fields.insert("description".into(), string_value(&record.description));
  fields.insert("image".into(), string_value(&record.image));
  fields.insert("link".into(), string_value(&record.link));
  fields.insert("price".into(), string_value(&record.price));
  fields.insert("rating".into(), double_value(record.rating));
  fields.insert("features".into(), array_value(&record.features));
  fields.insert("downloads".into(), string_value(&record.downloads));
  fields.insert("revenue".into(), string_value(&record.revenue));
  fields
}

pub(crate) fn encode_patch(patch: &ProductPatch) -> Map<String, Value> {
  let mut fields = Map::new();
  let strings = [
    ("name", &patch.name),
    ("category", &patch.category),
    ("description", &patch.description),
    ("image", &patch.image),
    ("link", &patch.link),
    ("price", &patch.price),
    ("downloads", &patch.downloads),
    ("revenue", &patch.revenue),
  ];
  for (key, value) in strings {
    if let Some(v) = value {
      fields.insert(key.into(), string_value(v));
    }
  }
  if let Some(rating) = patch.rating {
    fields.insert("rating".into(), double_value(rating));
  }
  if let Some(features) = &patch.features {
    fields.insert("features".into(), array_value(features));
  }
  fields
}

fn decode_string(fields: &Map<String, Value>, key: &str) -> String {
  fields
    .get(key)
    .and_then(|v| v.get("stringValue"))
    .and_then(Value::as_str)
    .unwrap_or_default()
    .to_string()
}

fn decode_number(fields: &Map<String, Value>, key: &str) -> CatalogResult<f64> {
  let Some(value) = fields.get(key) else {
    return Ok(0.0);
  };
  if let Some(d) = value.get("doubleValue").and_then(Value::as_f64) {
    return Ok(d);
  }
  // integerValue is transported as a decimal string.
  if let Some(i) = value.get("integerValue") {
    let parsed = match i {
      Value::String(s) => s.parse::<i64>().ok(),
      other => other.as_i64(),
    };
    return parsed
      .map(|n| n as f64)
      .ok_or_else(|| CatalogError::Store(format!("field '{}' holds an invalid integer", key)));
  }
  Err(CatalogError::Store(format!("field '{}' is not numeric", key)))
}

fn decode_string_array(fields: &Map<String, Value>, key: &str) -> Vec<String> {
  fields
    .get(key)
    .and_then(|v| v.get("arrayValue"))
    .and_then(|a| a.get("values"))
    .and_then(Value::as_array)
    .map(|values| {
      values
        .iter()
        .filter_map(|v| v.get("stringValue").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
    })
    .unwrap_or_default()
}

fn decode_timestamp(fields: &Map<String, Value>, key: &str) -> CatalogResult<Option<DateTime<Utc>>> {
  match fields.get(key).and_then(|v| v.get("timestampValue")).and_then(Value::as_str) {
    None => Ok(None),
    Some(raw) => DateTime::parse_from_rfc3339(raw)
      .map(|ts| Some(ts.with_timezone(&Utc)))
      .map_err(|e| CatalogError::Store(format!("field '{}' holds an invalid timestamp: {}", key, e))),
  }
}

pub(crate) fn decode_document(doc: &Document) -> CatalogResult<Product> {
  let fields = &doc.fields;
  Ok(Product {
    id: doc.id().to_string(),
    name: decode_string(fields, "name"),
    category: decode_string(fields, "category"),
    description: decode_string(fields, "description"),
    image: decode_string(fields, "image"),
    link: decode_string(fields, "link"),
    price: decode_string(fields, "price"),
    rating: decode_number(fields, "rating")?,
    features: decode_string_array(fields, "features"),
    downloads: decode_string(fields, "downloads"),
    revenue: decode_string(fields, "revenue"),
    created_at: decode_timestamp(fields, "createdAt")?,
    updated_at: decode_timestamp(fields, "updatedAt")?,
  })
}
