// vitrine/src/store/firestore/mod.rs

//! Products collection on Cloud Firestore, over its REST API.
//!
//! Creation and updates go through `documents:commit` so `createdAt` and
//! `updatedAt` are set from the server's request time, never by this client.

mod value;

use crate::config::StoreConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::model::{NewProduct, Product, ProductPatch};
use crate::store::ProductBackend;
use async_trait::async_trait;
use reqwest::{IntoUrl, Method, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, instrument, warn};
use uuid::Uuid;
use value::{decode_document, encode_new_product, encode_patch, Document};

#[derive(Debug, Deserialize)]
struct QueryRow {
  document: Option<Document>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
  error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
  message: String,
  #[serde(default)]
  status: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FirestoreBackend {
  client: reqwest::Client,
  config: StoreConfig,
}

impl FirestoreBackend {
  pub fn new(config: StoreConfig) -> Self {
    Self::with_client(reqwest::Client::new(), config)
  }

  pub fn with_client(client: reqwest::Client, config: StoreConfig) -> Self {
    Self { client, config }
  }

  /// Resource name used inside request bodies.
  fn document_name(&self, id: &str) -> String {
    format!(
      "projects/{}/databases/(default)/documents/{}/{}",
      self.config.project_id, self.config.collection, id
    )
  }

  /// Absolute document URL with `id` as a single, percent-encoded path segment.
  fn document_url(&self, id: &str) -> CatalogResult<Url> {
    check_document_id(id)?;
    let root = self.config.documents_root();
    let mut url =
      Url::parse(&root).map_err(|e| CatalogError::Config(format!("Invalid document store URL '{}': {}", root, e)))?;
    url
      .path_segments_mut()
      .map_err(|_| CatalogError::Config(format!("Document store URL '{}' cannot take a path", root)))?
      .push(&self.config.collection)
      .push(id);
    Ok(url)
  }

  fn request(&self, method: Method, url: impl IntoUrl) -> RequestBuilder {
    let builder = self.client.request(method, url);
    match &self.config.api_key {
      Some(key) => builder.query(&[("key", key)]),
      None => builder,
    }
  }

  async fn commit(&self, write: Value) -> CatalogResult<()> {
    let url = format!("{}:commit", self.config.documents_root());
    let response = self
      .request(Method::POST, &url)
      .json(&json!({ "writes": [write] }))
      .send()
      .await?;
    ensure_success(response).await.map(|_| ())
  }
}

/// Document ids are single path segments: never empty, never `.`/`..`, no `/`.
fn check_document_id(id: &str) -> CatalogResult<()> {
  if id.is_empty() || id == "." || id == ".." || id.contains('/') {
    return Err(CatalogError::Store(format!("Invalid document id '{}'", id)));
  }
  Ok(())
}

/// Turns a non-2xx answer into `CatalogError::Store` carrying the server's message.
async fn ensure_success(response: Response) -> CatalogResult<Response> {
  let status = response.status();
  if status.is_success() {
    return Ok(response);
  }
  let body = response.text().await.unwrap_or_default();
  let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
    Ok(envelope) => match envelope.error.status {
      Some(code) => format!("{} ({})", envelope.error.message, code),
      None => envelope.error.message,
    },
    Err(_) => format!(
      "{} {}",
      status.as_u16(),
      status.canonical_reason().unwrap_or("unexpected status")
    ),
  };
  Err(CatalogError::Store(message))
}

#[async_trait]
impl ProductBackend for FirestoreBackend {
  #[instrument(name = "firestore::list", skip(self), fields(collection = %self.config.collection))]
  async fn list(&self, limit: Option<usize>) -> CatalogResult<Vec<Product>> {
    let mut query = json!({
      "from": [{ "collectionId": self.config.collection }],
      "orderBy": [{ "field": { "fieldPath": "createdAt" }, "direction": "DESCENDING" }],
    });
    if let Some(limit) = limit {
      query["limit"] = json!(limit);
    }

    let url = format!("{}:runQuery", self.config.documents_root());
    let response = self
      .request(Method::POST, &url)
      .json(&json!({ "structuredQuery": query }))
      .send()
      .await?;
    let rows: Vec<QueryRow> = ensure_success(response).await?.json().await?;

    let products: Vec<Product> = rows
      .iter()
      .filter_map(|row| row.document.as_ref())
      .filter_map(|doc| match decode_document(doc) {
        Ok(product) => Some(product),
        Err(e) => {
          warn!(document = %doc.name, error = %e, "Skipping undecodable product document.");
          None
        }
      })
      .collect();
    debug!(count = products.len(), "Products fetched.");
    Ok(products)
  }

  #[instrument(name = "firestore::get", skip(self))]
  async fn get(&self, id: &str) -> CatalogResult<Option<Product>> {
    let response = self.request(Method::GET, self.document_url(id)?).send().await?;
    if response.status() == StatusCode::NOT_FOUND {
      return Ok(None);
    }
    let doc: Document = ensure_success(response).await?.json().await?;
    decode_document(&doc).map(Some)
  }

  #[instrument(name = "firestore::create", skip(self, record), fields(name = %record.name))]
  async fn create(&self, record: &NewProduct) -> CatalogResult<String> {
    let id = Uuid::new_v4().simple().to_string();
    let write = json!({
      "update": {
        "name": self.document_name(&id),
        "fields": encode_new_product(record),
      },
      "currentDocument": { "exists": false },
      "updateTransforms": [
        { "fieldPath": "createdAt", "setToServerValue": "REQUEST_TIME" },
        { "fieldPath": "updatedAt", "setToServerValue": "REQUEST_TIME" },
      ],
    });
    self.commit(write).await?;
    debug!(%id, "Product document created.");
    Ok(id)
  }

  #[instrument(name = "firestore::update", skip(self, patch))]
  async fn update(&self, id: &str, patch: &ProductPatch) -> CatalogResult<()> {
    check_document_id(id)?;
    let write = json!({
      "update": {
        "name": self.document_name(id),
        "fields": encode_patch(patch),
      },
      "updateMask": { "fieldPaths": patch.field_names() },
      "currentDocument": { "exists": true },
      "updateTransforms": [
        { "fieldPath": "updatedAt", "setToServerValue": "REQUEST_TIME" },
      ],
    });
    self.commit(write).await
  }

  #[instrument(name = "firestore::delete", skip(self))]
  async fn delete(&self, id: &str) -> CatalogResult<()> {
    let response = self.request(Method::DELETE, self.document_url(id)?).send().await?;
    ensure_success(response).await.map(|_| ())
  }
}
