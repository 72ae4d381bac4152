// src/models/order_line.rs

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// One line of a placed order. `price_cents` is the per-unit price
/// snapshotted at placement time; the row is immutable once written.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrderLine {
  pub id: Uuid,
  pub order_id: Uuid,
  pub product_id: Uuid,
  pub quantity: i64,
  pub price_cents: i64,
}

/// An order line joined (left) with its product for display. The
/// product columns are nullable because lines survive product deletion.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrderLineView {
  pub id: Uuid,
  pub order_id: Uuid,
  pub product_id: Uuid,
  pub quantity: i64,
  pub price_cents: i64,
  pub product_name: Option<String>,
  pub product_image: Option<String>,
}
