// vitrine/admin/src/web/handlers/owner_handlers.rs

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::auth::bearer_token;

#[derive(Deserialize)]
pub struct OpenSessionPayload {
  pub password: String,
}

#[instrument(name = "handler::open_session", skip_all)]
pub async fn open_session_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<OpenSessionPayload>,
) -> Result<HttpResponse, AppError> {
  match app_state.gate.authorize(&req_payload.password) {
    Some(session) => {
      app_state.sessions.insert(session.clone());
      info!(active_sessions = app_state.sessions.active_count(), "Owner session opened.");
      Ok(HttpResponse::Ok().json(session))
    }
    None => Err(AppError::Auth("Invalid password".to_string())),
  }
}

#[instrument(name = "handler::close_session", skip_all)]
pub async fn close_session_handler(req: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let token = bearer_token(&req).ok_or_else(|| AppError::Auth("Missing bearer token".to_string()))?;
  if app_state.sessions.revoke(&token) {
    info!("Owner session closed.");
    Ok(HttpResponse::NoContent().finish())
  } else {
    warn!("Attempt to close an unknown session.");
    Err(AppError::Auth("Unknown session".to_string()))
  }
}

#[cfg(test)]
mod tests {
  use crate::web::handlers::test_support::*;
  use actix_web::http::StatusCode;
  use actix_web::test;
  use serde_json::Value;

  #[actix_web::test]
  async fn session_lifecycle() {
    let app = test::init_service(test_app(test_state())).await;

    let denied = test::TestRequest::post()
      .uri("/api/v1/owner/session")
      .set_json(serde_json::json!({ "password": "wrong" }))
      .to_request();
    assert_eq!(test::call_service(&app, denied).await.status(), StatusCode::UNAUTHORIZED);

    let granted = test::TestRequest::post()
      .uri("/api/v1/owner/session")
      .set_json(serde_json::json!({ "password": OWNER_PASSWORD }))
      .to_request();
    let body: Value = test::call_and_read_body_json(&app, granted).await;
    let token = body["token"].as_str().expect("token").to_string();
    assert!(body["expires_at"].is_string());

    let logout = test::TestRequest::delete()
      .uri("/api/v1/owner/session")
      .insert_header(("Authorization", format!("Bearer {}", token)))
      .to_request();
    assert_eq!(test::call_service(&app, logout).await.status(), StatusCode::NO_CONTENT);

    let again = test::TestRequest::delete()
      .uri("/api/v1/owner/session")
      .insert_header(("Authorization", format!("Bearer {}", token)))
      .to_request();
    assert_eq!(test::call_service(&app, again).await.status(), StatusCode::UNAUTHORIZED);
  }
}
