// src/web/handlers/account_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use super::see_other;
use crate::errors::AppError;
use crate::models::OrderStatus;
use crate::state::AppState;
use crate::web::extractors::CustomerSession;

#[derive(Deserialize, Debug)]
pub struct UpdateProfilePayload {
  pub name: String,
  pub phone: Option<String>,
  pub address: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateProfileImagePayload {
  pub image: String,
}

#[instrument(name = "handler::account_dashboard", skip(app_state, customer), fields(user_id = %customer.0.user_id))]
pub async fn dashboard_handler(
  app_state: web::Data<AppState>,
  customer: CustomerSession,
) -> Result<HttpResponse, AppError> {
  let session = customer.0;
  let user = app_state
    .store
    .user_by_id(session.user_id)
    .await?
    .ok_or_else(|| AppError::NotFound("Account no longer exists.".to_string()))?;
  let orders = app_state.store.orders_for_user(session.user_id).await?;

  let total_orders = orders.len();
  let pending_orders = orders.iter().filter(|o| o.status == OrderStatus::Pending).count();
  let delivered_orders = orders.iter().filter(|o| o.status == OrderStatus::Delivered).count();
  let flash = app_state.sessions.take_flash(session.token);

  Ok(HttpResponse::Ok().json(json!({
      "user": user,
      "orders": orders,
      "total_orders": total_orders,
      "pending_orders": pending_orders,
      "delivered_orders": delivered_orders,
      "flash": flash
  })))
}

#[instrument(name = "handler::account_orders", skip(app_state, customer), fields(user_id = %customer.0.user_id))]
pub async fn orders_handler(app_state: web::Data<AppState>, customer: CustomerSession) -> Result<HttpResponse, AppError> {
  let session = customer.0;
  let orders = app_state.store.orders_for_user(session.user_id).await?;
  let flash = app_state.sessions.take_flash(session.token);

  Ok(HttpResponse::Ok().json(json!({ "orders": orders, "flash": flash })))
}

#[instrument(
    name = "handler::account_order_detail",
    skip(app_state, customer, path),
    fields(user_id = %customer.0.user_id, order_id = %path.as_ref())
)]
pub async fn order_detail_handler(
  app_state: web::Data<AppState>,
  customer: CustomerSession,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let session = customer.0;
  let order_id = path.into_inner();

  // Another user's order looks identical to a missing one.
  let order = app_state
    .store
    .get_order(order_id)
    .await?
    .filter(|order| order.user_id == session.user_id)
    .ok_or_else(|| AppError::NotFound("Order not found.".to_string()))?;
  let items = app_state.store.order_lines(order.id).await?;
  let flash = app_state.sessions.take_flash(session.token);

  Ok(HttpResponse::Ok().json(json!({
      "order": order,
      "items": items,
      "flash": flash
  })))
}

#[instrument(name = "handler::update_profile", skip(app_state, customer, payload), fields(user_id = %customer.0.user_id))]
pub async fn update_profile_handler(
  app_state: web::Data<AppState>,
  customer: CustomerSession,
  payload: web::Json<UpdateProfilePayload>,
) -> Result<HttpResponse, AppError> {
  let session = customer.0;
  let name = payload.name.trim();
  if name.is_empty() {
    return Err(AppError::Validation("Name is required.".to_string()));
  }
  let phone = payload.phone.as_deref().map(str::trim).filter(|s| !s.is_empty());
  let address = payload.address.as_deref().map(str::trim).filter(|s| !s.is_empty());

  app_state.store.update_profile(session.user_id, name, phone, address).await?;

  info!("Profile updated.");
  app_state.sessions.set_flash(session.token, "Profile updated.");
  Ok(see_other("/account"))
}

#[instrument(name = "handler::update_profile_image", skip(app_state, customer, payload), fields(user_id = %customer.0.user_id))]
pub async fn update_profile_image_handler(
  app_state: web::Data<AppState>,
  customer: CustomerSession,
  payload: web::Json<UpdateProfileImagePayload>,
) -> Result<HttpResponse, AppError> {
  let session = customer.0;
  let image = payload.image.trim();
  if image.is_empty() {
    return Err(AppError::Validation("An image reference is required.".to_string()));
  }

  app_state.store.update_profile_image(session.user_id, image).await?;

  app_state.sessions.set_flash(session.token, "Profile photo updated.");
  Ok(see_other("/account"))
}
