// src/web/handlers/checkout_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use super::see_other;
use crate::errors::AppError;
use crate::state::AppState;
use crate::store::StoreError;
use crate::web::extractors::CustomerSession;

/// Payment options offered at checkout. Free-form in storage; this list
/// is what the page renders.
const PAYMENT_METHODS: [&str; 3] = ["COD", "Bkash", "Card"];
const DEFAULT_PAYMENT_METHOD: &str = "COD";

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutAction {
  Place,
}

/// Order placement is `POST /checkout?action=place`; the query enum
/// keeps the contract closed.
#[derive(Deserialize, Debug)]
pub struct CheckoutQuery {
  pub action: CheckoutAction,
}

#[derive(Deserialize, Debug)]
pub struct PlaceOrderPayload {
  pub shipping_address: String,
  pub payment_method: Option<String>,
}

#[instrument(name = "handler::checkout_page", skip(app_state, customer), fields(user_id = %customer.0.user_id))]
pub async fn checkout_page_handler(
  app_state: web::Data<AppState>,
  customer: CustomerSession,
) -> Result<HttpResponse, AppError> {
  let session = customer.0;
  let items = app_state.store.cart_lines(session.user_id).await?;
  if items.is_empty() {
    app_state.sessions.set_flash(session.token, "Your cart is empty.");
    return Ok(see_other("/cart"));
  }
  let subtotal_cents: i64 = items.iter().map(|line| line.line_total_cents).sum();
  let flash = app_state.sessions.take_flash(session.token);

  Ok(HttpResponse::Ok().json(json!({
      "items": items,
      "subtotal_cents": subtotal_cents,
      "payment_methods": PAYMENT_METHODS,
      "flash": flash
  })))
}

/// Places the order. The store does the transactional work; this
/// handler validates the shipping form, retries once on a transaction
/// conflict, and turns engine errors into flash+redirect outcomes with
/// cart and stock untouched.
#[instrument(
    name = "handler::place_order",
    skip(app_state, customer, query, payload),
    fields(user_id = %customer.0.user_id)
)]
pub async fn place_order_handler(
  app_state: web::Data<AppState>,
  customer: CustomerSession,
  query: web::Query<CheckoutQuery>,
  payload: web::Json<PlaceOrderPayload>,
) -> Result<HttpResponse, AppError> {
  let CheckoutAction::Place = query.action;
  let session = customer.0;

  let shipping_address = payload.shipping_address.trim();
  if shipping_address.is_empty() {
    app_state.sessions.set_flash(session.token, "Shipping address required.");
    return Ok(see_other("/checkout"));
  }
  let payment_method = payload
    .payment_method
    .as_deref()
    .map(str::trim)
    .filter(|m| !m.is_empty())
    .unwrap_or(DEFAULT_PAYMENT_METHOD);

  let mut result = app_state.store.place_order(session.user_id, shipping_address, payment_method).await;
  if matches!(result, Err(StoreError::Conflict)) {
    info!("Order placement hit a transaction conflict; retrying once.");
    result = app_state.store.place_order(session.user_id, shipping_address, payment_method).await;
  }

  match result {
    Ok(order_id) => {
      info!(%order_id, "Order placed.");
      app_state
        .sessions
        .set_flash(session.token, format!("Order placed successfully. Order ID: #{}", order_id));
      Ok(see_other(&format!("/account/orders/{}", order_id)))
    }
    Err(StoreError::EmptyCart) => {
      app_state.sessions.set_flash(session.token, "Your cart is empty.");
      Ok(see_other("/cart"))
    }
    Err(StoreError::InsufficientStock(product_id)) => {
      let message = match app_state.store.get_product(product_id).await? {
        Some(product) => format!("Insufficient stock for {}.", product.name),
        None => "Insufficient stock for an item in your cart.".to_string(),
      };
      warn!(%product_id, "Order placement rejected: insufficient stock.");
      app_state.sessions.set_flash(session.token, message);
      Ok(see_other("/cart"))
    }
    Err(StoreError::Conflict) => {
      warn!("Order placement failed twice on transaction conflicts.");
      app_state
        .sessions
        .set_flash(session.token, "Could not place the order, please try again.");
      Ok(see_other("/checkout"))
    }
    Err(e) => Err(e.into()),
  }
}
