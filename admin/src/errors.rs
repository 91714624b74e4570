// vitrine/admin/src/errors.rs

use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;
use vitrine::CatalogError;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Busy: {0}")]
  Busy(String),

  /// The media host or the document store failed.
  #[error("Upstream Service Error: {0}")]
  Upstream(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl From<CatalogError> for AppError {
  fn from(err: CatalogError) -> Self {
    let message = err.to_string();
    match err {
      CatalogError::Validation(_) | CatalogError::MissingImage => AppError::Validation(message),
      CatalogError::Unauthorized(_) => AppError::Auth(message),
      CatalogError::Busy => AppError::Busy(message),
      CatalogError::Upload(_) | CatalogError::Store(_) | CatalogError::NotPersisted => AppError::Upstream(message),
      CatalogError::Config(_) => AppError::Config(message),
      CatalogError::Pipeline { .. } | CatalogError::Internal(_) => AppError::Internal(message),
    }
  }
}

impl ResponseError for AppError {
  fn error_response(&self) -> HttpResponse {
    tracing::error!(application_error = %self, "Responding with error");
    match self {
      AppError::Validation(m) => HttpResponse::BadRequest().json(json!({"error": m})),
      AppError::Auth(m) => HttpResponse::Unauthorized().json(json!({"error": m})),
      AppError::NotFound(m) => HttpResponse::NotFound().json(json!({"error": m})),
      AppError::Busy(m) => HttpResponse::Conflict().json(json!({"error": m})),
      AppError::Upstream(m) => HttpResponse::BadGateway().json(json!({"error": "Upstream service error", "detail": m})),
      AppError::Config(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "Configuration issue", "detail": m}))
      }
      AppError::Internal(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "An internal error occurred", "detail": m}))
      }
    }
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::http::StatusCode;

  #[test]
  fn catalog_errors_map_to_http_statuses() {
    let cases = [
      (CatalogError::MissingImage, StatusCode::BAD_REQUEST),
      (CatalogError::Validation("too big".into()), StatusCode::BAD_REQUEST),
      (CatalogError::Unauthorized("no session".into()), StatusCode::UNAUTHORIZED),
      (CatalogError::Busy, StatusCode::CONFLICT),
      (CatalogError::Upload("503".into()), StatusCode::BAD_GATEWAY),
      (CatalogError::NotPersisted, StatusCode::BAD_GATEWAY),
      (CatalogError::Internal("bug".into()), StatusCode::INTERNAL_SERVER_ERROR),
    ];
    for (err, expected) in cases {
      assert_eq!(AppError::from(err).error_response().status(), expected);
    }
  }
}
