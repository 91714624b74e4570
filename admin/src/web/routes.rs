// vitrine/admin/src/web/routes.rs

use crate::web::handlers::{catalog_handlers, owner_handlers, product_handlers};
use actix_web::web;

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1")
      .route("/health", web::get().to(health_check_handler))
      .service(
        web::resource("/owner/session")
          .route(web::post().to(owner_handlers::open_session_handler))
          .route(web::delete().to(owner_handlers::close_session_handler)),
      )
      .service(
        web::resource("/products")
          .route(web::get().to(product_handlers::list_products_handler))
          .route(web::post().to(product_handlers::create_product_handler)),
      )
      // Literal segments go ahead of `/products/{product_id}`.
      .route("/products/latest", web::get().to(product_handlers::latest_products_handler))
      .route(
        "/products/category/{category}",
        web::get().to(product_handlers::products_by_category_handler),
      )
      .route(
        "/products/{product_id}/images",
        web::get().to(product_handlers::product_images_handler),
      )
      .service(
        web::resource("/products/{product_id}")
          .route(web::get().to(product_handlers::get_product_handler))
          .route(web::patch().to(product_handlers::update_product_handler))
          .route(web::delete().to(product_handlers::delete_product_handler)),
      )
      .route("/catalog", web::get().to(catalog_handlers::displayed_products_handler))
      .route("/catalog/status", web::get().to(catalog_handlers::add_status_handler)),
  );
}
