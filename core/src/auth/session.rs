// vitrine/src/auth/session.rs

use crate::auth::password::verify_password;
use crate::config::OwnerConfig;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Proof of a successful owner login, valid until `expires_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerSession {
  pub token: Uuid,
  pub expires_at: DateTime<Utc>,
}

impl OwnerSession {
  pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
    now < self.expires_at
  }

  pub fn is_active(&self) -> bool {
    self.is_active_at(Utc::now())
  }
}

/// Compares a submitted password with the owner's hash and hands out sessions.
#[derive(Debug, Clone)]
pub struct OwnerGate {
  config: OwnerConfig,
}

impl OwnerGate {
  pub fn new(config: OwnerConfig) -> Self {
    Self { config }
  }

  pub fn session_duration(&self) -> Duration {
    self.config.session_duration
  }

  /// Returns a fresh session when `password` matches, `None` otherwise.
  #[instrument(name = "owner_gate::authorize", skip_all)]
  pub fn authorize(&self, password: &str) -> Option<OwnerSession> {
    match verify_password(&self.config.password_hash, password) {
      Ok(true) => {
        let session = OwnerSession {
          token: Uuid::new_v4(),
          expires_at: Utc::now() + self.config.session_duration,
        };
        info!(expires_at = %session.expires_at, "Owner session granted.");
        Some(session)
      }
      Ok(false) => {
        warn!("Invalid owner password. Access denied.");
        None
      }
      Err(e) => {
        warn!(error = %e, "Owner password could not be verified.");
        None
      }
    }
  }
}

/// Sessions issued by an [`OwnerGate`], looked up by token.
#[derive(Debug, Default)]
pub struct SessionBook {
  sessions: Mutex<HashMap<Uuid, OwnerSession>>,
}

impl SessionBook {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&self, session: OwnerSession) {
    let mut sessions = self.sessions.lock();
    let now = Utc::now();
    sessions.retain(|_, s| s.is_active_at(now));
    sessions.insert(session.token, session);
  }

  /// True when `token` names a live session. Expired entries are dropped on sight.
  pub fn is_authorized(&self, token: &Uuid) -> bool {
    let mut sessions = self.sessions.lock();
    match sessions.get(token) {
      Some(session) if session.is_active() => true,
      Some(_) => {
        sessions.remove(token);
        false
      }
      None => false,
    }
  }

  /// Logs a session out. Returns whether it existed.
  pub fn revoke(&self, token: &Uuid) -> bool {
    self.sessions.lock().remove(token).is_some()
  }

  pub fn active_count(&self) -> usize {
    let now = Utc::now();
    self.sessions.lock().values().filter(|s| s.is_active_at(now)).count()
  }
}
