// src/web/extractors.rs

//! Request extractors carrying the acting user.
//!
//! Handlers never reach into ambient session state: the session arrives
//! as an explicit extractor argument, and the role-guard newtypes below
//! are the route-level access control. Guard failures map to 401 (no
//! valid session) or 403 (wrong role) through `AppError`.

use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::Role;
use crate::state::AppState;

/// An authenticated request: the session token plus the identity it
/// resolves to.
#[derive(Debug, Clone)]
pub struct AuthSession {
  pub token: Uuid,
  pub user_id: Uuid,
  pub name: String,
  pub email: String,
  pub role: Role,
}

fn resolve_session(req: &HttpRequest) -> Result<Option<AuthSession>, AppError> {
  let state = req
    .app_data::<web::Data<AppState>>()
    .ok_or_else(|| AppError::Internal("Application state is not configured.".to_string()))?;

  let cookie = match req.cookie(&state.config.session_cookie) {
    Some(cookie) => cookie,
    None => return Ok(None),
  };
  let token = match Uuid::parse_str(cookie.value()) {
    Ok(token) => token,
    Err(_) => return Ok(None),
  };

  Ok(state.sessions.get(token).map(|session| AuthSession {
    token,
    user_id: session.user_id,
    name: session.name,
    email: session.email,
    role: session.role,
  }))
}

impl FromRequest for AuthSession {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    ready(match resolve_session(req) {
      Ok(Some(session)) => Ok(session),
      Ok(None) => Err(AppError::Auth("Login required.".to_string())),
      Err(e) => Err(e),
    })
  }
}

/// Optional session for public pages; `None` when the visitor is not
/// logged in or the cookie no longer resolves.
#[derive(Debug, Clone)]
pub struct MaybeSession(pub Option<AuthSession>);

impl FromRequest for MaybeSession {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    ready(resolve_session(req).map(MaybeSession))
  }
}

/// Guard: customer accounts only. Carts and checkout belong to
/// customers; staff and admin get 403 here.
#[derive(Debug, Clone)]
pub struct CustomerSession(pub AuthSession);

impl FromRequest for CustomerSession {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, payload: &mut actix_web::dev::Payload) -> Self::Future {
    ready(match AuthSession::from_request(req, payload).into_inner() {
      Ok(session) => match session.role {
        Role::Customer => Ok(CustomerSession(session)),
        Role::Staff | Role::Admin => Err(AppError::Forbidden("Customer account required.".to_string())),
      },
      Err(e) => Err(e),
    })
  }
}

/// Guard: staff or admin.
#[derive(Debug, Clone)]
pub struct StaffSession(pub AuthSession);

impl FromRequest for StaffSession {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, payload: &mut actix_web::dev::Payload) -> Self::Future {
    ready(match AuthSession::from_request(req, payload).into_inner() {
      Ok(session) => match session.role {
        Role::Staff | Role::Admin => Ok(StaffSession(session)),
        Role::Customer => Err(AppError::Forbidden("Staff access required.".to_string())),
      },
      Err(e) => Err(e),
    })
  }
}

/// Guard: admin only.
#[derive(Debug, Clone)]
pub struct AdminSession(pub AuthSession);

impl FromRequest for AdminSession {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, payload: &mut actix_web::dev::Payload) -> Self::Future {
    ready(match AuthSession::from_request(req, payload).into_inner() {
      Ok(session) => match session.role {
        Role::Admin => Ok(AdminSession(session)),
        Role::Customer | Role::Staff => Err(AppError::Forbidden("Admin access required.".to_string())),
      },
      Err(e) => Err(e),
    })
  }
}
