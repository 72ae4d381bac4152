// src/web/handlers/staff_handlers.rs

//! Staff pages: fulfilment dashboard and order status updates. Staff
//! see every order but may not cancel one; that stays with admins.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::see_other;
use crate::errors::AppError;
use crate::models::OrderStatus;
use crate::state::AppState;
use crate::store::OrderFilter;
use crate::web::extractors::StaffSession;

/// Orders shown on the staff dashboard.
const DASHBOARD_RECENT_ORDERS: i64 = 10;

#[derive(Deserialize, Debug)]
pub struct StaffOrdersQuery {
  pub status: Option<String>,
  pub page: Option<i64>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateStatusPayload {
  pub status: String,
}

#[instrument(name = "handler::staff_dashboard", skip(app_state, staff))]
pub async fn dashboard_handler(app_state: web::Data<AppState>, staff: StaffSession) -> Result<HttpResponse, AppError> {
  let counts = app_state.store.order_status_counts().await?;
  let recent_orders = app_state.store.recent_orders(DASHBOARD_RECENT_ORDERS).await?;
  let flash = app_state.sessions.take_flash(staff.0.token);

  Ok(HttpResponse::Ok().json(json!({
      "counts": counts,
      "recent_orders": recent_orders,
      "flash": flash
  })))
}

#[instrument(name = "handler::staff_orders", skip(app_state, staff, query))]
pub async fn orders_handler(
  app_state: web::Data<AppState>,
  staff: StaffSession,
  query: web::Query<StaffOrdersQuery>,
) -> Result<HttpResponse, AppError> {
  let status = match query.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
    None => None,
    Some(s) => Some(
      OrderStatus::parse(s).ok_or_else(|| AppError::Validation("Unknown status filter.".to_string()))?,
    ),
  };
  let filter = OrderFilter {
    status,
    q: None,
    page: query.page.unwrap_or(1),
  };
  let orders = app_state.store.admin_orders(&filter).await?;
  let counts = app_state.store.order_status_counts().await?;
  let flash = app_state.sessions.take_flash(staff.0.token);

  Ok(HttpResponse::Ok().json(json!({
      "orders": orders,
      "counts": counts,
      "flash": flash
  })))
}

#[instrument(
    name = "handler::staff_update_order_status",
    skip(app_state, staff, path, payload),
    fields(order_id = %path.as_ref(), status = %payload.status)
)]
pub async fn update_order_status_handler(
  app_state: web::Data<AppState>,
  staff: StaffSession,
  path: web::Path<Uuid>,
  payload: web::Json<UpdateStatusPayload>,
) -> Result<HttpResponse, AppError> {
  let order_id = path.into_inner();
  let status = payload.status.trim();

  // The staff-assignable set excludes cancellation, so an attempt to
  // cancel reads as an invalid status here.
  match OrderStatus::parse(status) {
    Some(parsed) if parsed.staff_assignable() => {
      app_state.store.update_order_status(order_id, status).await?;
      info!("Order status updated by staff.");
      app_state.sessions.set_flash(staff.0.token, "Order status updated.");
    }
    _ => {
      warn!("Rejected staff status update.");
      app_state.sessions.set_flash(staff.0.token, "Invalid status.");
    }
  }
  Ok(see_other("/staff/orders"))
}
