// tests/http_adapter_tests.rs
mod common;

use common::*;
use serial_test::serial;
use vitrine::{
  CatalogError, CloudinaryUploader, FirestoreBackend, ImageUploader, MediaConfig, ProductBackend, ProductPatch,
  StoreConfig,
};

fn media_config(api_base: &str) -> MediaConfig {
  MediaConfig {
    cloud_name: "demo".to_string(),
    upload_preset: "unsigned_products".to_string(),
    api_base: api_base.to_string(),
    product_folder: "products".to_string(),
  }
}

fn store_config(base_url: &str) -> StoreConfig {
  StoreConfig {
    project_id: "portfolio".to_string(),
    api_key: Some("test-key".to_string()),
    base_url: base_url.to_string(),
    collection: "products".to_string(),
  }
}

const DOCUMENT: &str = r#"{
  "name": "projects/portfolio/databases/(default)/documents/products/abc123",
  "fields": {
    "name": { "stringValue": "Widget" },
    "category": { "stringValue": "Web App" },
    "description": { "stringValue": "A product" },
    "image": { "stringValue": "https://res.cloudinary.com/demo/image/upload/v1/products/a.jpg" },
    "link": { "stringValue": "https://example.com" },
    "price": { "stringValue": "$10" },
    "rating": { "integerValue": "4" },
    "features": { "arrayValue": { "values": [{ "stringValue": "Fast" }, { "stringValue": "Cheap" }] } },
    "downloads": { "stringValue": "120" },
    "revenue": { "stringValue": "$900" },
    "createdAt": { "timestampValue": "2024-05-01T10:00:00.123456Z" },
    "updatedAt": { "timestampValue": "2024-05-02T10:00:00Z" }
  },
  "createTime": "2024-05-01T10:00:00.123456Z",
  "updateTime": "2024-05-02T10:00:00Z"
}"#;

#[tokio::test]
#[serial]
async fn cloudinary_upload_posts_multipart_form() {
  setup_tracing();
  let (base, server) = one_shot_server(
    200,
    r#"{"secure_url":"https://res.cloudinary.com/demo/image/upload/v1/products/xyz.jpg","public_id":"products/xyz"}"#,
  )
  .await;
  let uploader = CloudinaryUploader::new(&media_config(&base));

  let uploaded = uploader.upload(&jpeg_image(2048), "products").await.expect("uploaded");
  let request = server.await.expect("server task");

  assert_eq!(uploaded.public_id, "products/xyz");
  assert_eq!(uploaded.url, "https://res.cloudinary.com/demo/image/upload/v1/products/xyz.jpg");
  assert!(request.starts_with("POST /demo/image/upload "));
  assert!(request.contains("name=\"file\"; filename=\"photo.jpg\""));
  assert!(request.contains("name=\"upload_preset\""));
  assert!(request.contains("unsigned_products"));
  assert!(request.contains("name=\"folder\""));
}

#[tokio::test]
#[serial]
async fn cloudinary_error_message_is_surfaced() {
  setup_tracing();
  let (base, server) = one_shot_server(400, r#"{"error":{"message":"Upload preset not found"}}"#).await;
  let uploader = CloudinaryUploader::new(&media_config(&base));

  let err = uploader.upload(&jpeg_image(16), "products").await.unwrap_err();
  server.await.expect("server task");

  match err {
    CatalogError::Upload(message) => {
      assert_eq!(message, "Upload failed: Upload preset not found (400)");
    }
    other => panic!("unexpected error: {:?}", other),
  }
}

#[tokio::test]
#[serial]
async fn cloudinary_delete_is_a_placeholder() {
  setup_tracing();
  let uploader = CloudinaryUploader::new(&media_config("http://127.0.0.1:9"));
  assert!(uploader.delete("products/xyz").await);
}

#[tokio::test]
#[serial]
async fn firestore_get_decodes_document() {
  setup_tracing();
  let (base, server) = one_shot_server(200, DOCUMENT).await;
  let backend = FirestoreBackend::new(store_config(&base));

  let product = backend.get("abc123").await.expect("request ok").expect("found");
  let request = server.await.expect("server task");

  assert!(request.starts_with("GET /projects/portfolio/databases/(default)/documents/products/abc123?key=test-key "));
  assert_eq!(product.id, "abc123");
  assert_eq!(product.rating, 4.0);
  assert_eq!(product.features, vec!["Fast", "Cheap"]);
  assert_eq!(product.revenue, "$900");
  assert!(product.updated_at > product.created_at);
}

#[tokio::test]
#[serial]
async fn firestore_get_missing_document_is_none() {
  setup_tracing();
  let (base, server) = one_shot_server(
    404,
    r#"{"error":{"code":404,"message":"Document not found","status":"NOT_FOUND"}}"#,
  )
  .await;
  let backend = FirestoreBackend::new(store_config(&base));

  assert!(backend.get("nope").await.expect("request ok").is_none());
  server.await.expect("server task");
}

#[tokio::test]
#[serial]
async fn firestore_document_id_stays_in_its_path_segment() {
  setup_tracing();
  let (base, server) = one_shot_server(
    404,
    r#"{"error":{"code":404,"message":"Document not found","status":"NOT_FOUND"}}"#,
  )
  .await;
  let backend = FirestoreBackend::new(store_config(&base));

  assert!(backend.get("abc?mask.fieldPaths=name").await.expect("request ok").is_none());
  let request = server.await.expect("server task");

  assert!(request.starts_with(
    "GET /projects/portfolio/databases/(default)/documents/products/abc%3Fmask.fieldPaths=name?key=test-key "
  ));
}

#[tokio::test]
#[serial]
async fn firestore_rejects_ids_spanning_segments() {
  setup_tracing();
  let backend = FirestoreBackend::new(store_config("http://127.0.0.1:9"));

  assert!(matches!(backend.get("products/abc").await, Err(CatalogError::Store(_))));
  assert!(matches!(backend.delete("").await, Err(CatalogError::Store(_))));
  assert!(matches!(
    backend.update("..", &ProductPatch::default()).await,
    Err(CatalogError::Store(_))
  ));
}

#[tokio::test]
#[serial]
async fn firestore_list_skips_undecodable_documents() {
  setup_tracing();
  let broken = r#"{
    "name": "projects/portfolio/databases/(default)/documents/products/broken",
    "fields": { "name": { "stringValue": "Broken" }, "rating": { "stringValue": "five" } }
  }"#;
  let body = format!(r#"[{{"document":{}}},{{"document":{}}}]"#, broken, DOCUMENT);
  let (base, server) = one_shot_server(200, &body).await;
  let backend = FirestoreBackend::new(store_config(&base));

  let products = backend.list(None).await.expect("listed");
  server.await.expect("server task");

  assert_eq!(products.len(), 1);
  assert_eq!(products[0].id, "abc123");
}

#[tokio::test]
#[serial]
async fn firestore_list_runs_ordered_query() {
  setup_tracing();
  let body = format!(r#"[{{"document":{}, "readTime":"2024-05-03T00:00:00Z"}}]"#, DOCUMENT);
  let (base, server) = one_shot_server(200, &body).await;
  let backend = FirestoreBackend::new(store_config(&base));

  let products = backend.list(Some(6)).await.expect("listed");
  let request = server.await.expect("server task");

  assert_eq!(products.len(), 1);
  assert_eq!(products[0].name, "Widget");
  assert!(request.starts_with("POST /projects/portfolio/databases/(default)/documents:runQuery?key=test-key "));
  assert!(request.contains(r#""direction":"DESCENDING""#));
  assert!(request.contains(r#""limit":6"#));
}

#[tokio::test]
#[serial]
async fn firestore_create_uses_server_timestamps() {
  setup_tracing();
  let (base, server) = one_shot_server(200, r#"{"writeResults":[{}],"commitTime":"2024-05-03T00:00:00Z"}"#).await;
  let backend = FirestoreBackend::new(store_config(&base));

  let id = backend.create(&sample_record("Widget", "Web App")).await.expect("created");
  let request = server.await.expect("server task");

  assert_eq!(id.len(), 32);
  assert!(request.starts_with("POST /projects/portfolio/databases/(default)/documents:commit?key=test-key "));
  assert!(request.contains(&format!("documents/products/{}", id)));
  assert!(request.contains(r#""setToServerValue":"REQUEST_TIME""#));
  assert!(request.contains(r#""exists":false"#));
}

#[tokio::test]
#[serial]
async fn firestore_update_failure_carries_server_message() {
  setup_tracing();
  let (base, server) = one_shot_server(
    404,
    r#"{"error":{"code":404,"message":"No document to update","status":"NOT_FOUND"}}"#,
  )
  .await;
  let backend = FirestoreBackend::new(store_config(&base));
  let patch = ProductPatch {
    price: Some("$12".to_string()),
    ..Default::default()
  };

  let err = backend.update("abc123", &patch).await.unwrap_err();
  let request = server.await.expect("server task");

  assert!(request.contains(r#""fieldPaths":["price"]"#));
  match err {
    CatalogError::Store(message) => assert_eq!(message, "No document to update (NOT_FOUND)"),
    other => panic!("unexpected error: {:?}", other),
  }
}
