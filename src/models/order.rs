// src/models/order.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type as SqlxType};
use uuid::Uuid;

/// Lifecycle of an order. The set is closed: every inbound status
/// string must parse into one of these five values or be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, SqlxType)]
#[sqlx(type_name = "order_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
  Pending,
  Confirmed,
  Shipped,
  Delivered,
  Cancelled,
}

impl OrderStatus {
  pub const ALL: [OrderStatus; 5] = [
    OrderStatus::Pending,
    OrderStatus::Confirmed,
    OrderStatus::Shipped,
    OrderStatus::Delivered,
    OrderStatus::Cancelled,
  ];

  /// Parses the lowercase wire form. Anything outside the closed set
  /// yields `None`; callers turn that into their invalid-status error.
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "pending" => Some(OrderStatus::Pending),
      "confirmed" => Some(OrderStatus::Confirmed),
      "shipped" => Some(OrderStatus::Shipped),
      "delivered" => Some(OrderStatus::Delivered),
      "cancelled" => Some(OrderStatus::Cancelled),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      OrderStatus::Pending => "pending",
      OrderStatus::Confirmed => "confirmed",
      OrderStatus::Shipped => "shipped",
      OrderStatus::Delivered => "delivered",
      OrderStatus::Cancelled => "cancelled",
    }
  }

  /// Staff may move orders through fulfilment but may not cancel;
  /// cancellation stays an admin action.
  pub fn staff_assignable(&self) -> bool {
    match self {
      OrderStatus::Pending | OrderStatus::Confirmed | OrderStatus::Shipped | OrderStatus::Delivered => true,
      OrderStatus::Cancelled => false,
    }
  }
}

impl std::fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A placed order. `total_amount_cents` and the shipping fields are
/// written once by the order engine and never recomputed afterwards.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Order {
  pub id: Uuid,
  pub user_id: Uuid,
  pub total_amount_cents: i64,
  pub status: OrderStatus,
  pub shipping_address: String,
  pub payment_method: String,
  pub created_at: DateTime<Utc>,
}

/// An order joined with its customer, for the admin and staff lists.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrderSummary {
  pub id: Uuid,
  pub user_id: Uuid,
  pub total_amount_cents: i64,
  pub status: OrderStatus,
  pub created_at: DateTime<Utc>,
  pub customer_name: String,
  pub customer_email: String,
}

/// Order counters shown on the admin and staff order pages.
#[derive(Debug, Clone, Copy, Default, Serialize, FromRow)]
pub struct OrderStatusCounts {
  pub total: i64,
  pub pending: i64,
  pub shipped: i64,
  pub delivered: i64,
}

/// Admin dashboard headline numbers. Revenue excludes cancelled orders.
#[derive(Debug, Clone, Copy, Default, Serialize, FromRow)]
pub struct AdminStats {
  pub total_products: i64,
  pub total_orders: i64,
  pub pending_orders: i64,
  pub revenue_cents: i64,
}
