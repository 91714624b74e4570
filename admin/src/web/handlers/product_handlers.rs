// vitrine/admin/src/web/handlers/product_handlers.rs

use actix_multipart::{Field, Multipart};
use actix_web::{web, HttpRequest, HttpResponse};
use futures_util::TryStreamExt;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::auth::owner_authorized;
use vitrine::media::MAX_IMAGE_BYTES;
use vitrine::{
  responsive_image_urls, ImageFile, ProductDraft, ProductPatch, ProductSubmission, DEFAULT_LATEST_LIMIT,
};

/// Upper bound for a single text field of the add-product form.
const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

#[derive(Deserialize, Debug)]
pub struct LatestProductsQuery {
  pub limit: Option<usize>,
}

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let products = app_state.store.list().await?;
  info!("Successfully fetched {} products.", products.len());
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::latest_products", skip(app_state))]
pub async fn latest_products_handler(
  app_state: web::Data<AppState>,
  query: web::Query<LatestProductsQuery>,
) -> Result<HttpResponse, AppError> {
  let limit = query.limit.unwrap_or(DEFAULT_LATEST_LIMIT);
  if limit == 0 {
    return Err(AppError::Validation("limit must be positive".to_string()));
  }
  let products = app_state.store.list_latest(limit).await?;
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::products_by_category", skip(app_state, path), fields(category = %path.as_str()))]
pub async fn products_by_category_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let products = app_state.store.list_by_category(&path).await?;
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_str()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();
  match app_state.store.get_by_id(&product_id).await {
    Some(product) => Ok(HttpResponse::Ok().json(product)),
    None => {
      warn!("Product with ID {} not found.", product_id);
      Err(AppError::NotFound(format!("Product with ID {} not found.", product_id)))
    }
  }
}

/// Delivery URLs of a product's image at the preset sizes.
#[instrument(name = "handler::product_images", skip(app_state, path), fields(product_id = %path.as_str()))]
pub async fn product_images_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let product = app_state
    .store
    .get_by_id(&path)
    .await
    .ok_or_else(|| AppError::NotFound(format!("Product with ID {} not found.", path.as_str())))?;
  Ok(HttpResponse::Ok().json(responsive_image_urls(&product.image)))
}

#[instrument(name = "handler::create_product", skip_all)]
pub async fn create_product_handler(
  req: HttpRequest,
  app_state: web::Data<AppState>,
  payload: Multipart,
) -> Result<HttpResponse, AppError> {
  if !owner_authorized(&req, &app_state) {
    return Err(AppError::Auth("Owner session required".to_string()));
  }
  let submission = read_submission(payload).await?;
  let product = app_state.controller.add_product(true, submission).await?;
  info!(product_id = %product.id, "Product created.");
  Ok(HttpResponse::Created().json(product))
}

#[instrument(name = "handler::update_product", skip(req, app_state, path, patch), fields(product_id = %path.as_str()))]
pub async fn update_product_handler(
  req: HttpRequest,
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  patch: web::Json<ProductPatch>,
) -> Result<HttpResponse, AppError> {
  let authorized = owner_authorized(&req, &app_state);
  if patch.is_empty() {
    return Err(AppError::Validation("No fields to update".to_string()));
  }
  app_state.controller.update_product(authorized, &path, &patch).await?;
  Ok(HttpResponse::NoContent().finish())
}

#[instrument(name = "handler::delete_product", skip(req, app_state, path), fields(product_id = %path.as_str()))]
pub async fn delete_product_handler(
  req: HttpRequest,
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let authorized = owner_authorized(&req, &app_state);
  app_state.controller.delete_product(authorized, &path).await?;
  Ok(HttpResponse::NoContent().finish())
}

fn multipart_error(e: impl std::fmt::Display) -> AppError {
  AppError::Validation(format!("Failed to read multipart field: {}", e))
}

/// Collects up to `cap` bytes of `field` and drains the rest. The returned
/// length exceeds the caller's own limit when the field was larger.
async fn read_field(field: &mut Field, cap: usize) -> Result<Vec<u8>, AppError> {
  let mut bytes = Vec::new();
  while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
    let room = cap.saturating_sub(bytes.len());
    bytes.extend_from_slice(&chunk[..chunk.len().min(room)]);
  }
  Ok(bytes)
}

/// Reads the add-product form. An oversized image is kept one byte past the
/// limit so the validator rejects it with its usual message.
async fn read_submission(mut payload: Multipart) -> Result<ProductSubmission, AppError> {
  let mut draft = ProductDraft::default();
  let mut image = None;

  while let Some(mut field) = payload.try_next().await.map_err(multipart_error)? {
    let name = field.name().unwrap_or_default().to_string();

    if name == "image" {
      let file_name = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .unwrap_or("upload")
        .to_string();
      let content_type = field
        .content_type()
        .map(|mime| mime.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());
      let bytes = read_field(&mut field, MAX_IMAGE_BYTES + 1).await?;
      if !bytes.is_empty() {
        image = Some(ImageFile::new(file_name, content_type, bytes));
      }
      continue;
    }

    let raw = read_field(&mut field, MAX_TEXT_FIELD_BYTES + 1).await?;
    if raw.len() > MAX_TEXT_FIELD_BYTES {
      return Err(AppError::Validation(format!("Field '{}' is too long", name)));
    }
    let text = String::from_utf8(raw).map_err(|_| AppError::Validation(format!("Field '{}' is not valid UTF-8", name)))?;

    match name.as_str() {
      "name" => draft.name = text,
      "category" => draft.category = text,
      "description" => draft.description = text,
      "price" => draft.price = text,
      "features" => draft.features = text,
      "link" => draft.link = text,
      other => debug!(field = %other, "Ignoring unknown form field."),
    }
  }

  Ok(ProductSubmission::new(draft, image))
}
