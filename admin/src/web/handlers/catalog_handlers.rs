// vitrine/admin/src/web/handlers/catalog_handlers.rs

use actix_web::{web, HttpResponse};
use tracing::instrument;

use crate::state::AppState;

/// The products currently on display: the startup listing plus everything
/// added through this server since.
#[instrument(name = "handler::displayed_products", skip_all)]
pub async fn displayed_products_handler(app_state: web::Data<AppState>) -> HttpResponse {
  HttpResponse::Ok().json(app_state.controller.products())
}

#[instrument(name = "handler::add_status", skip_all)]
pub async fn add_status_handler(app_state: web::Data<AppState>) -> HttpResponse {
  HttpResponse::Ok().json(app_state.controller.status())
}
