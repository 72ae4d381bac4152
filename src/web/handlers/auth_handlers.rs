// src/web/handlers/auth_handlers.rs

use actix_web::{cookie::Cookie, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::models::{NewUser, Role, User};
use crate::services::auth_service::{self, PasswordCheck};
use crate::state::AppState;
use crate::web::extractors::MaybeSession;

const MIN_PASSWORD_LEN: usize = 6;

// --- Request DTOs ---

#[derive(Deserialize, Debug)]
pub struct RegisterPayload {
  pub name: String,
  pub email: String,
  pub password: String,
  pub phone: Option<String>,
  pub address: Option<String>,
  pub security_question: Option<String>,
  pub security_answer: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct LoginPayload {
  pub email: String,
  pub password: String,
  /// The role the client claims to log in as; it must match the stored
  /// account role.
  pub role: String,
}

#[derive(Deserialize, Debug)]
pub struct ForgotPasswordPayload {
  pub email: String,
}

#[derive(Deserialize, Debug)]
pub struct VerifyAnswerPayload {
  pub email: String,
  pub answer: String,
}

#[derive(Deserialize, Debug)]
pub struct ResetPasswordPayload {
  pub email: String,
  pub answer: String,
  pub new_password: String,
  pub confirm_password: String,
}

fn trimmed_or_none(value: Option<&String>) -> Option<String> {
  value.map(|s| s.trim()).filter(|s| !s.is_empty()).map(str::to_string)
}

fn answers_match(stored: &str, given: &str) -> bool {
  stored.trim().to_lowercase() == given.trim().to_lowercase()
}

/// Resolves the user for the security-question flow and checks the
/// given answer. Shared by the verify and reset steps; the reset step
/// re-verifies so the flow cannot be skipped into.
async fn user_with_verified_answer(state: &AppState, email: &str, answer: &str) -> Result<User, AppError> {
  let user = state
    .store
    .user_by_email(email.trim())
    .await?
    .ok_or_else(|| AppError::NotFound("No account found for that email.".to_string()))?;
  let stored_answer = user
    .security_answer
    .clone()
    .ok_or_else(|| AppError::Validation("No security question is set for this account.".to_string()))?;
  if !answers_match(&stored_answer, answer) {
    return Err(AppError::Auth("Incorrect security answer.".to_string()));
  }
  Ok(user)
}

// --- Handler Implementations ---

#[instrument(name = "handler::register", skip(app_state, payload), fields(req_email = %payload.email))]
pub async fn register_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<RegisterPayload>,
) -> Result<HttpResponse, AppError> {
  let name = payload.name.trim();
  let email = payload.email.trim();
  if name.is_empty() || email.is_empty() || payload.password.is_empty() {
    return Err(AppError::Validation("Name, email and password are required.".to_string()));
  }

  let password_hash = auth_service::hash_password(&payload.password)?;
  let new_user = NewUser {
    name: name.to_string(),
    email: email.to_string(),
    password_hash,
    role: Role::Customer,
    phone: trimmed_or_none(payload.phone.as_ref()),
    address: trimmed_or_none(payload.address.as_ref()),
    security_question: trimmed_or_none(payload.security_question.as_ref()),
    security_answer: trimmed_or_none(payload.security_answer.as_ref()),
  };
  let user = app_state.store.create_user(&new_user).await?;

  info!(user_id = %user.id, "Registration successful.");
  Ok(HttpResponse::Created().json(json!({
      "message": "Registration successful. Please log in.",
      "user": user
  })))
}

#[instrument(name = "handler::login", skip(app_state, payload), fields(req_email = %payload.email, req_role = %payload.role))]
pub async fn login_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<LoginPayload>,
) -> Result<HttpResponse, AppError> {
  let email = payload.email.trim();
  if email.is_empty() || payload.password.is_empty() || payload.role.trim().is_empty() {
    return Err(AppError::Validation("Email, password and role are required.".to_string()));
  }
  let requested_role =
    Role::parse(payload.role.trim()).ok_or_else(|| AppError::Validation("Invalid role selected.".to_string()))?;

  let user = app_state
    .store
    .user_by_email(email)
    .await?
    .ok_or_else(|| AppError::Auth("Invalid email or password.".to_string()))?;

  // The login form is role-scoped: a customer cannot enter through the
  // staff or admin form even with valid credentials.
  if user.role != requested_role {
    warn!(stored_role = %user.role, "Login rejected: role mismatch.");
    return Err(AppError::Auth(format!("You are not authorized as {}.", requested_role)));
  }

  match auth_service::verify_or_upgrade(&user.password_hash, &payload.password)? {
    PasswordCheck::Match { rehash } => {
      if let Some(new_hash) = rehash {
        app_state.store.update_password(user.id, &new_hash).await?;
        info!(user_id = %user.id, "Legacy credential upgraded to Argon2.");
      }
    }
    PasswordCheck::Mismatch => {
      return Err(AppError::Auth("Invalid email or password.".to_string()));
    }
  }

  let token = app_state.sessions.create(user.id, &user.name, &user.email, user.role);
  let cookie = Cookie::build(app_state.config.session_cookie.clone(), token.to_string())
    .path("/")
    .http_only(true)
    .finish();

  info!(user_id = %user.id, role = %user.role, "Login successful.");
  Ok(HttpResponse::Ok().cookie(cookie).json(json!({
      "message": "Login successful.",
      "user": user
  })))
}

#[instrument(name = "handler::logout", skip(app_state, session))]
pub async fn logout_handler(app_state: web::Data<AppState>, session: MaybeSession) -> Result<HttpResponse, AppError> {
  if let Some(session) = session.0 {
    app_state.sessions.revoke(session.token);
  }
  let mut removal = Cookie::build(app_state.config.session_cookie.clone(), "").path("/").http_only(true).finish();
  removal.make_removal();
  Ok(HttpResponse::Ok().cookie(removal).json(json!({ "message": "Logged out." })))
}

/// Step 1 of password recovery: look up the account's security
/// question.
#[instrument(name = "handler::forgot_password", skip(app_state, payload), fields(req_email = %payload.email))]
pub async fn forgot_password_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<ForgotPasswordPayload>,
) -> Result<HttpResponse, AppError> {
  let user = app_state
    .store
    .user_by_email(payload.email.trim())
    .await?
    .ok_or_else(|| AppError::NotFound("No account found for that email.".to_string()))?;
  let question = user
    .security_question
    .ok_or_else(|| AppError::Validation("No security question is set for this account.".to_string()))?;
  Ok(HttpResponse::Ok().json(json!({ "question": question })))
}

/// Step 2: verify the security answer before the client shows the new
/// password form.
#[instrument(name = "handler::verify_security_answer", skip(app_state, payload), fields(req_email = %payload.email))]
pub async fn verify_security_answer_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<VerifyAnswerPayload>,
) -> Result<HttpResponse, AppError> {
  user_with_verified_answer(&app_state, &payload.email, &payload.answer).await?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Answer verified." })))
}

/// Step 3: set the new password. The answer travels with this request
/// again and is re-checked, so the endpoint works without server-side
/// flow state.
#[instrument(name = "handler::reset_password", skip(app_state, payload), fields(req_email = %payload.email))]
pub async fn reset_password_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<ResetPasswordPayload>,
) -> Result<HttpResponse, AppError> {
  let user = user_with_verified_answer(&app_state, &payload.email, &payload.answer).await?;

  if payload.new_password.len() < MIN_PASSWORD_LEN {
    return Err(AppError::Validation("Password must be at least 6 characters.".to_string()));
  }
  if payload.new_password != payload.confirm_password {
    return Err(AppError::Validation("Passwords do not match.".to_string()));
  }

  let password_hash = auth_service::hash_password(&payload.new_password)?;
  app_state.store.update_password(user.id, &password_hash).await?;

  info!(user_id = %user.id, "Password reset via security question.");
  Ok(HttpResponse::Ok().json(json!({ "message": "Password updated. Please log in." })))
}
