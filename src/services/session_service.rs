// src/services/session_service.rs

//! Server-side sessions.
//!
//! Login issues an opaque uuid token, delivered to the browser as an
//! HttpOnly cookie; the map here resolves tokens back to the acting
//! user on every request. Sessions hold identity and the pending flash
//! message only, never cart or inventory data. The map is in-process:
//! restarting the server logs everyone out.

use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use crate::models::Role;

/// The identity a valid session token resolves to.
#[derive(Debug, Clone)]
pub struct Session {
  pub user_id: Uuid,
  pub name: String,
  pub email: String,
  pub role: Role,
}

#[derive(Debug)]
struct SessionEntry {
  session: Session,
  flash: Option<String>,
}

#[derive(Debug, Default)]
pub struct Sessions {
  inner: RwLock<HashMap<Uuid, SessionEntry>>,
}

impl Sessions {
  pub fn new() -> Self {
    Self::default()
  }

  /// Issues a fresh token for the user. Existing tokens for the same
  /// user stay valid; logging in twice yields two sessions.
  pub fn create(&self, user_id: Uuid, name: &str, email: &str, role: Role) -> Uuid {
    let token = Uuid::new_v4();
    let entry = SessionEntry {
      session: Session {
        user_id,
        name: name.to_string(),
        email: email.to_string(),
        role,
      },
      flash: None,
    };
    self.inner.write().insert(token, entry);
    debug!(%user_id, %role, "Session created.");
    token
  }

  pub fn get(&self, token: Uuid) -> Option<Session> {
    self.inner.read().get(&token).map(|entry| entry.session.clone())
  }

  pub fn revoke(&self, token: Uuid) {
    if self.inner.write().remove(&token).is_some() {
      debug!("Session revoked.");
    }
  }

  /// Stores a one-shot message for the session; the next
  /// [`take_flash`](Self::take_flash) consumes it.
  pub fn set_flash(&self, token: Uuid, message: impl Into<String>) {
    if let Some(entry) = self.inner.write().get_mut(&token) {
      entry.flash = Some(message.into());
    }
  }

  pub fn take_flash(&self, token: Uuid) -> Option<String> {
    self.inner.write().get_mut(&token).and_then(|entry| entry.flash.take())
  }
}
