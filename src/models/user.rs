// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type as SqlxType};
use uuid::Uuid;

/// The three account roles. Closed set; route guards and the login
/// role check match on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, SqlxType)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Customer,
  Staff,
  Admin,
}

impl Role {
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "customer" => Some(Role::Customer),
      "staff" => Some(Role::Staff),
      "admin" => Some(Role::Admin),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Role::Customer => "customer",
      Role::Staff => "staff",
      Role::Admin => "admin",
    }
  }
}

impl std::fmt::Display for Role {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
  pub id: Uuid,
  pub name: String,
  pub email: String,
  #[serde(skip_serializing)] // Never send password hash to client
  pub password_hash: String,
  pub role: Role,
  pub phone: Option<String>,
  pub address: Option<String>,
  pub profile_image: Option<String>,
  // The question is shown back during password recovery; the answer
  // never leaves the server.
  pub security_question: Option<String>,
  #[serde(skip_serializing)]
  pub security_answer: Option<String>,
  pub created_at: DateTime<Utc>,
}

/// Input for account creation. `password_hash` is already hashed by the
/// caller; the store never sees plain-text passwords.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub name: String,
  pub email: String,
  pub password_hash: String,
  pub role: Role,
  pub phone: Option<String>,
  pub address: Option<String>,
  pub security_question: Option<String>,
  pub security_answer: Option<String>,
}

/// A customer row with purchase aggregates for the admin customer list.
/// `total_spent_cents` excludes cancelled orders.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CustomerSummary {
  pub id: Uuid,
  pub name: String,
  pub email: String,
  pub phone: Option<String>,
  pub created_at: DateTime<Utc>,
  pub order_count: i64,
  pub total_spent_cents: i64,
}
