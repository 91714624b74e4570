// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::Level;
use vitrine::{
  CatalogError, CatalogResult, ImageFile, ImageUploader, NewProduct, Product, ProductBackend, ProductDraft,
  ProductPatch, UploadedImage,
};

// --- Tracing ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Fixtures ---
pub fn jpeg_image(size: usize) -> ImageFile {
  ImageFile::new("photo.jpg", "image/jpeg", vec![0xFF; size])
}

pub fn sample_draft(name: &str) -> ProductDraft {
  ProductDraft {
    name: name.to_string(),
    category: "Web App".to_string(),
    description: "A product".to_string(),
    price: "$10".to_string(),
    features: "Fast, Cheap".to_string(),
    link: "https://example.com".to_string(),
  }
}

pub fn sample_record(name: &str, category: &str) -> NewProduct {
  let mut draft = sample_draft(name);
  draft.category = category.to_string();
  NewProduct::from_draft(&draft, "https://res.cloudinary.com/demo/image/upload/v1/products/a.jpg")
}

// --- Fake media host ---
/// Hands out deterministic URLs and counts calls. With `fail` set, every upload
/// is rejected. With `gate` set, uploads wait until it is notified.
#[derive(Default)]
pub struct FakeUploader {
  pub calls: AtomicUsize,
  pub fail: bool,
  pub gate: Option<Arc<Notify>>,
}

impl FakeUploader {
  pub fn failing() -> Self {
    Self {
      fail: true,
      ..Default::default()
    }
  }

  pub fn gated(gate: Arc<Notify>) -> Self {
    Self {
      gate: Some(gate),
      ..Default::default()
    }
  }

  pub fn call_count(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl ImageUploader for FakeUploader {
  async fn upload(&self, file: &ImageFile, folder: &str) -> CatalogResult<UploadedImage> {
    let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
    if let Some(gate) = &self.gate {
      gate.notified().await;
    }
    if self.fail {
      return Err(CatalogError::Upload("Upload failed: Service Unavailable (503)".to_string()));
    }
    let public_id = format!("{}/upload-{}", folder, n);
    Ok(UploadedImage {
      url: format!("https://res.cloudinary.com/demo/image/upload/v1/{}-{}", public_id, file.file_name),
      public_id,
    })
  }
}

// --- Unreachable document store ---
pub struct UnavailableBackend;

fn unavailable() -> CatalogError {
  CatalogError::Store("service unavailable".to_string())
}

#[async_trait]
impl ProductBackend for UnavailableBackend {
  async fn list(&self, _limit: Option<usize>) -> CatalogResult<Vec<Product>> {
    Err(unavailable())
  }

  async fn get(&self, _id: &str) -> CatalogResult<Option<Product>> {
    Err(unavailable())
  }

  async fn create(&self, _record: &NewProduct) -> CatalogResult<String> {
    Err(unavailable())
  }

  async fn update(&self, _id: &str, _patch: &ProductPatch) -> CatalogResult<()> {
    Err(unavailable())
  }

  async fn delete(&self, _id: &str) -> CatalogResult<()> {
    Err(unavailable())
  }
}

// --- One-shot HTTP responder ---
/// Accepts a single connection on an ephemeral port, answers it with `status`
/// and the JSON `body`, and yields the raw request it received.
pub async fn one_shot_server(status: u16, body: &str) -> (String, JoinHandle<String>) {
  let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind test listener");
  let addr = listener.local_addr().expect("listener address");
  let body = body.to_string();

  let handle = tokio::spawn(async move {
    let (mut socket, _) = listener.accept().await.expect("accept connection");
    let request = read_request(&mut socket).await;
    let response = format!(
      "HTTP/1.1 {} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
      status,
      body.len(),
      body
    );
    socket.write_all(response.as_bytes()).await.expect("write response");
    socket.shutdown().await.ok();
    request
  });

  (format!("http://{}", addr), handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
  let mut buf = Vec::new();
  let mut chunk = [0u8; 8192];

  let header_end = loop {
    let n = tokio::time::timeout(Duration::from_secs(5), socket.read(&mut chunk))
      .await
      .expect("request headers in time")
      .expect("read request");
    if n == 0 {
      return String::from_utf8_lossy(&buf).into_owned();
    }
    buf.extend_from_slice(&chunk[..n]);
    if let Some(pos) = find(&buf, b"\r\n\r\n") {
      break pos + 4;
    }
  };

  let head = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
  let content_length = head
    .lines()
    .find_map(|line| line.strip_prefix("content-length:"))
    .and_then(|v| v.trim().parse::<usize>().ok());
  let chunked = head.contains("transfer-encoding: chunked");

  loop {
    let body = &buf[header_end..];
    let complete = match content_length {
      Some(len) => body.len() >= len,
      None if chunked => find(body, b"0\r\n\r\n").is_some(),
      None => true,
    };
    if complete {
      break;
    }
    let n = tokio::time::timeout(Duration::from_secs(5), socket.read(&mut chunk))
      .await
      .expect("request body in time")
      .expect("read request body");
    if n == 0 {
      break;
    }
    buf.extend_from_slice(&chunk[..n]);
  }

  String::from_utf8_lossy(&buf).into_owned()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
  haystack.windows(needle.len()).position(|w| w == needle)
}
