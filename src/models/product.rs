// src/models/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A catalog item. Prices are integer cents; `stock` is the single
/// sellable quantity, mutated only by staff edits and order placement.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
  pub id: Uuid,
  pub name: String,
  pub description: Option<String>,
  pub price_cents: i64,
  pub size: Option<String>,
  pub color: Option<String>,
  pub category: Option<String>,
  pub image: Option<String>,
  pub stock: i64,
  pub created_at: DateTime<Utc>,
}

/// Input for catalog creation (admin surface).
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
  pub name: String,
  pub description: Option<String>,
  pub price_cents: i64,
  pub size: Option<String>,
  pub color: Option<String>,
  pub category: Option<String>,
  pub image: Option<String>,
  pub stock: i64,
}

/// Catalog listing filters. `category` is an exact match, `q` a
/// case-insensitive substring over name and description; both combine.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
  pub category: Option<String>,
  pub q: Option<String>,
}
