// src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::see_other;
use crate::errors::AppError;
use crate::state::AppState;
use crate::store::StoreError;
use crate::web::extractors::CustomerSession;

/// Cart mutations arrive as `POST /cart?action=...`, one endpoint
/// dispatching over this closed set.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CartAction {
  Add,
  Update,
  Remove,
  Clear,
}

#[derive(Deserialize, Debug)]
pub struct CartActionQuery {
  pub action: CartAction,
}

#[derive(Deserialize, Debug, Default)]
pub struct CartMutationPayload {
  pub product_id: Option<Uuid>,
  pub entry_id: Option<Uuid>,
  pub quantity: Option<i64>,
}

#[derive(Deserialize, Debug)]
pub struct AddToCartAjaxPayload {
  pub product_id: Uuid,
  pub quantity: Option<i64>,
}

#[instrument(name = "handler::view_cart", skip(app_state, customer), fields(user_id = %customer.0.user_id))]
pub async fn view_cart_handler(
  app_state: web::Data<AppState>,
  customer: CustomerSession,
) -> Result<HttpResponse, AppError> {
  let session = customer.0;
  let items = app_state.store.cart_lines(session.user_id).await?;
  let subtotal_cents: i64 = items.iter().map(|line| line.line_total_cents).sum();
  let flash = app_state.sessions.take_flash(session.token);

  Ok(HttpResponse::Ok().json(json!({
      "items": items,
      "subtotal_cents": subtotal_cents,
      "flash": flash
  })))
}

#[instrument(
    name = "handler::cart_action",
    skip(app_state, customer, query, payload),
    fields(user_id = %customer.0.user_id, action = ?query.action)
)]
pub async fn cart_action_handler(
  app_state: web::Data<AppState>,
  customer: CustomerSession,
  query: web::Query<CartActionQuery>,
  payload: web::Json<CartMutationPayload>,
) -> Result<HttpResponse, AppError> {
  let session = customer.0;
  let result = match query.action {
    CartAction::Add => {
      let product_id = payload
        .product_id
        .ok_or_else(|| AppError::Validation("A product is required.".to_string()))?;
      let quantity = payload.quantity.unwrap_or(1);
      app_state.store.add_to_cart(session.user_id, product_id, quantity).await.map(|_| "Added to cart.")
    }
    CartAction::Update => {
      let entry_id = payload
        .entry_id
        .ok_or_else(|| AppError::Validation("A cart entry is required.".to_string()))?;
      let quantity = payload
        .quantity
        .ok_or_else(|| AppError::Validation("A quantity is required.".to_string()))?;
      app_state
        .store
        .update_cart_quantity(session.user_id, entry_id, quantity)
        .await
        .map(|_| "Cart updated.")
    }
    CartAction::Remove => {
      let entry_id = payload
        .entry_id
        .ok_or_else(|| AppError::Validation("A cart entry is required.".to_string()))?;
      app_state.store.remove_cart_entry(session.user_id, entry_id).await.map(|_| "Item removed.")
    }
    CartAction::Clear => app_state.store.clear_cart(session.user_id).await.map(|_| "Cart cleared."),
  };

  match result {
    Ok(message) => {
      info!(message, "Cart mutation applied.");
      app_state.sessions.set_flash(session.token, message);
    }
    // A vanished product surfaces on the cart page instead of erroring
    // the redirect flow.
    Err(StoreError::ProductNotFound(product_id)) => {
      warn!(%product_id, "Cart add rejected: product not found.");
      app_state.sessions.set_flash(session.token, "Product not found.");
    }
    Err(e) => return Err(e.into()),
  }

  Ok(see_other("/cart"))
}

/// JSON variant of the add action for the storefront's badge updates:
/// responds with the new cart count instead of a redirect.
#[instrument(
    name = "handler::add_to_cart_ajax",
    skip(app_state, customer, payload),
    fields(user_id = %customer.0.user_id, product_id = %payload.product_id)
)]
pub async fn add_to_cart_ajax_handler(
  app_state: web::Data<AppState>,
  customer: CustomerSession,
  payload: web::Json<AddToCartAjaxPayload>,
) -> Result<HttpResponse, AppError> {
  let session = customer.0;
  let quantity = payload.quantity.unwrap_or(1);

  match app_state.store.add_to_cart(session.user_id, payload.product_id, quantity).await {
    Ok(()) => {
      let count = app_state.store.count_cart_items(session.user_id).await?;
      Ok(HttpResponse::Ok().json(json!({
          "success": true,
          "message": "Added to cart.",
          "count": count
      })))
    }
    Err(StoreError::ProductNotFound(_)) => Ok(HttpResponse::Ok().json(json!({
        "success": false,
        "message": "Product not found."
    }))),
    Err(e) => Err(e.into()),
  }
}
