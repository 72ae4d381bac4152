// src/store/checkout.rs

//! The order-placement engine.
//!
//! [`run`] drives the whole checkout sequence against a [`CheckoutTx`],
//! the unit-of-work seam a backend opens for one placement attempt. The
//! Postgres backend implements it directly on `sqlx::Transaction`, so
//! the steps below execute inside one database transaction with the
//! cart and product rows locked; the in-memory test backend stages the
//! same steps and applies them only on success. Either way the sequence
//! and its failure behavior live here, once.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::StoreError;
use crate::models::{Order, OrderLine, OrderStatus};

/// A cart entry joined with the product fields checkout needs, as read
/// under lock at the start of the transaction. `price_cents` and
/// `stock` come from that locked read and stay authoritative for the
/// rest of the attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLine {
  pub product_id: Uuid,
  pub quantity: i64,
  pub price_cents: i64,
  pub stock: i64,
}

/// One in-flight order placement. Implementations must guarantee that
/// either every mutation issued through the value commits, or none do.
#[async_trait]
pub trait CheckoutTx: Send {
  /// Reads the user's cart joined with product price and stock,
  /// locking the rows against concurrent placements.
  async fn locked_cart_lines(&mut self, user_id: Uuid) -> Result<Vec<CheckoutLine>, StoreError>;
  async fn insert_order(&mut self, order: &Order) -> Result<(), StoreError>;
  async fn insert_order_line(&mut self, line: &OrderLine) -> Result<(), StoreError>;
  async fn deduct_stock(&mut self, product_id: Uuid, quantity: i64) -> Result<(), StoreError>;
  async fn clear_cart(&mut self, user_id: Uuid) -> Result<(), StoreError>;
}

/// Validates the locked lines and computes the order total in cents.
///
/// An empty cart fails with `EmptyCart`. Any line requesting more than
/// the locked stock fails with `InsufficientStock` naming the product;
/// partial fulfilment does not exist. The total is the sum of
/// `quantity * price_cents` over the locked read, never a fresh lookup.
pub fn validate_lines(lines: &[CheckoutLine]) -> Result<i64, StoreError> {
  if lines.is_empty() {
    return Err(StoreError::EmptyCart);
  }
  let mut total_cents: i64 = 0;
  for line in lines {
    if line.quantity > line.stock {
      return Err(StoreError::InsufficientStock(line.product_id));
    }
    total_cents += line.quantity * line.price_cents;
  }
  Ok(total_cents)
}

/// Runs the placement sequence. The caller opens the transaction,
/// invokes this, and commits only on `Ok`; any error must abort the
/// whole unit of work.
pub async fn run<T: CheckoutTx + ?Sized>(
  tx: &mut T,
  user_id: Uuid,
  shipping_address: &str,
  payment_method: &str,
) -> Result<Order, StoreError> {
  let lines = tx.locked_cart_lines(user_id).await?;
  let total_cents = validate_lines(&lines)?;

  let order = Order {
    id: Uuid::new_v4(),
    user_id,
    total_amount_cents: total_cents,
    status: OrderStatus::Pending,
    shipping_address: shipping_address.to_string(),
    payment_method: payment_method.to_string(),
    created_at: Utc::now(),
  };
  tx.insert_order(&order).await?;

  for line in &lines {
    let order_line = OrderLine {
      id: Uuid::new_v4(),
      order_id: order.id,
      product_id: line.product_id,
      quantity: line.quantity,
      price_cents: line.price_cents,
    };
    tx.insert_order_line(&order_line).await?;
    tx.deduct_stock(line.product_id, line.quantity).await?;
  }

  tx.clear_cart(user_id).await?;

  tracing::info!(
    order_id = %order.id,
    user_id = %user_id,
    total_cents = order.total_amount_cents,
    line_count = lines.len(),
    "Order placement sequence completed; awaiting commit."
  );

  Ok(order)
}
