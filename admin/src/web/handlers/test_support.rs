// vitrine/admin/src/web/handlers/test_support.rs

use crate::state::AppState;
use crate::web::configure_app_routes;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App};
use async_trait::async_trait;
use std::sync::Arc;
use vitrine::auth::hash_password;
use vitrine::{
  CatalogController, CatalogError, CatalogResult, ImageFile, ImageUploader, InMemoryBackend, OwnerConfig, OwnerGate,
  ProductStore, UploadedImage,
};

pub const OWNER_PASSWORD: &str = "correct horse battery staple";
pub const BOUNDARY: &str = "----vitrine-test-boundary";

pub struct FakeUploader {
  pub fail: bool,
}

#[async_trait]
impl ImageUploader for FakeUploader {
  async fn upload(&self, file: &ImageFile, folder: &str) -> CatalogResult<UploadedImage> {
    if self.fail {
      return Err(CatalogError::Upload("Upload failed: Service Unavailable (503)".to_string()));
    }
    Ok(UploadedImage {
      url: format!("https://res.cloudinary.com/demo/image/upload/v1/{}/{}", folder, file.file_name),
      public_id: format!("{}/{}", folder, file.file_name),
    })
  }
}

pub fn test_state_with(uploader: FakeUploader) -> AppState {
  let store = ProductStore::new(InMemoryBackend::new());
  let controller = CatalogController::new(Arc::new(uploader), store);
  let gate = OwnerGate::new(OwnerConfig {
    password_hash: hash_password(OWNER_PASSWORD).expect("hash owner password"),
    session_duration: chrono::Duration::hours(1),
  });
  AppState::new(controller, gate)
}

pub fn test_state() -> AppState {
  test_state_with(FakeUploader { fail: false })
}

pub fn test_app(
  state: AppState,
) -> App<
  impl ServiceFactory<
    ServiceRequest,
    Config = (),
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
    InitError = (),
  >,
> {
  App::new()
    .app_data(web::Data::new(state))
    .configure(configure_app_routes)
}

/// Opens a session directly on the state and returns its bearer header value.
pub fn owner_bearer(state: &AppState) -> String {
  let session = state.gate.authorize(OWNER_PASSWORD).expect("owner session");
  state.sessions.insert(session.clone());
  format!("Bearer {}", session.token)
}

/// A multipart/form-data body with text `fields` and an optional `image` file part.
pub fn multipart_body(fields: &[(&str, &str)], image: Option<(&str, &str, &[u8])>) -> Vec<u8> {
  let mut body = Vec::new();
  for (name, value) in fields {
    body.extend_from_slice(
      format!(
        "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
        BOUNDARY, name, value
      )
      .as_bytes(),
    );
  }
  if let Some((file_name, content_type, bytes)) = image {
    body.extend_from_slice(
      format!(
        "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
        BOUNDARY, file_name, content_type
      )
      .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(b"\r\n");
  }
  body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
  body
}

pub fn multipart_content_type() -> String {
  format!("multipart/form-data; boundary={}", BOUNDARY)
}
