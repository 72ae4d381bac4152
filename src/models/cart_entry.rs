// src/models/cart_entry.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One row of a user's cart. At most one entry exists per
/// (user, product) pair; re-adding accumulates into `quantity`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CartEntry {
  pub id: Uuid,
  pub user_id: Uuid,
  pub product_id: Uuid,
  pub quantity: i64,
  pub added_at: DateTime<Utc>,
}

/// A cart entry joined with its product, as rendered on the cart and
/// checkout pages. `line_total_cents` is quantity times the current
/// price; the binding price snapshot is taken at order placement, not
/// here.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CartLine {
  pub entry_id: Uuid,
  pub product_id: Uuid,
  pub name: String,
  pub image: Option<String>,
  pub price_cents: i64,
  pub quantity: i64,
  pub stock: i64,
  pub line_total_cents: i64,
}
