// vitrine/admin/src/web/auth.rs

//! Bearer-token lookup against the owner session book.

use crate::state::AppState;
use actix_web::http::header::AUTHORIZATION;
use actix_web::HttpRequest;
use uuid::Uuid;

/// The session token from `Authorization: Bearer <token>`, if well formed.
pub fn bearer_token(req: &HttpRequest) -> Option<Uuid> {
  let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
  let (scheme, token) = value.trim().split_once(' ')?;
  if !scheme.eq_ignore_ascii_case("bearer") {
    return None;
  }
  Uuid::parse_str(token.trim()).ok()
}

/// Whether the request carries a live owner session.
pub fn owner_authorized(req: &HttpRequest, state: &AppState) -> bool {
  bearer_token(req).map_or(false, |token| state.sessions.is_authorized(&token))
}
